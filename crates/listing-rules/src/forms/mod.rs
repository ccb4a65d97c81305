pub mod self_upload;
