// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod init;
pub mod inspect;
pub mod list;
pub mod verify;
