// SPDX-License-Identifier: MIT

//! Supporting services: password hashing and token generation.

pub mod password;
pub mod tokens;
