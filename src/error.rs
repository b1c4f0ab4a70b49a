// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::collections::TryReserveError;

/// Represents errors that can occur when mutating a collection
#[derive(Debug)]
pub enum Error {
    /// Storage for the collection could not be allocated
    ///
    /// The collection is left exactly as it was before the failed call.
    Allocation(TryReserveError),

    /// The key already exists and the collection rejects duplicates
    DuplicateKey,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CollectionError: {self:?}")
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation(e) => Some(e),
            Self::DuplicateKey => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(value: TryReserveError) -> Self {
        Self::Allocation(value)
    }
}

/// Collection result
pub type Result<T> = std::result::Result<T, Error>;
