/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt::Display;

/// Error type for memory allocation failures.
///
/// [GrowList](super::GrowList) and the parser buffers return this
/// error when the global allocator cannot grow their storage. Best
/// action is to abort the current operation; the partially built
/// structures are released when they go out of scope.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NoMemory;

impl Display for NoMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not enough memory")
    }
}

impl Error for NoMemory {}

impl From<TryReserveError> for NoMemory {
    fn from(_: TryReserveError) -> Self {
        NoMemory
    }
}
