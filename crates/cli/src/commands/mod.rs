// SPDX-License-Identifier: MIT

pub mod exec;
pub mod list;
pub mod schedule;
