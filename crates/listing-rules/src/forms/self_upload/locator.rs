//! Dotted locators such as `selfUpload.basic.price` or
//! `user_flats[0].user_flat_details.rent`.
//!
//! `name[]` addresses "the current group" and is resolved against the group index
//! carried by the field context; `name[3]` addresses a fixed element.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    Field(&'a str),
    Index(usize),
    Group,
    /// Unparseable bracket content; never matches anything.
    Invalid,
}

pub(crate) fn steps(path: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        match segment.split_once('[') {
            Some((name, bracket)) => {
                if !name.is_empty() {
                    steps.push(Step::Field(name));
                }
                let inner = bracket.strip_suffix(']').unwrap_or(bracket);
                if inner.is_empty() {
                    steps.push(Step::Group);
                } else {
                    match inner.parse::<usize>() {
                        Ok(index) => steps.push(Step::Index(index)),
                        Err(_) => steps.push(Step::Invalid),
                    }
                }
            }
            None => steps.push(Step::Field(segment)),
        }
    }
    steps
}
