/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

mod common;
pub use common::*;
mod operations;
pub use operations::*;
pub mod property_set;
pub use property_set::*;

pub mod response;
pub mod server_version;
pub mod soap;

pub mod create_folder;
pub mod create_item;
pub mod delete_folder;
pub mod delete_item;
pub mod get_folder;
pub mod get_item;
pub mod update_folder;
pub mod update_item;
