mod common;
mod populate;
mod registry;
mod section;
mod visibility;
