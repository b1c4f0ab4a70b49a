// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Decides what happens when a key is added that is already stored
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DuplicatePolicy {
    /// Store the new entry next to the old one
    ///
    /// The newest entry shadows older ones: lookups return it and removal
    /// removes it, revealing the previous entry.
    /// Every stored entry counts towards the size and shows up in key listings.
    #[default]
    Shadow,

    /// Replace the value of the existing entry in place
    Overwrite,

    /// Refuse the insert with [`Error::DuplicateKey`](crate::Error::DuplicateKey)
    Reject,
}

impl TryFrom<&str> for DuplicatePolicy {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "shadow" => Ok(Self::Shadow),
            "overwrite" => Ok(Self::Overwrite),
            "reject" => Ok(Self::Reject),
            _ => Err(()),
        }
    }
}
