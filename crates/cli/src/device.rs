// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity of the device both shells run on.

use crate::env;
use nosh_core::{InterfaceSource, StaticInterfaces, SystemInterfaces};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Device {
    pub user: String,
    pub host: String,
    pub interfaces: Rc<dyn InterfaceSource>,
}

impl Device {
    pub fn from_env() -> Self {
        let interfaces: Rc<dyn InterfaceSource> = match env::interfaces() {
            Some(list) => Rc::new(StaticInterfaces::parse(&list)),
            None => Rc::new(SystemInterfaces),
        };
        Self {
            user: env::user().unwrap_or_else(|| "user".to_string()),
            host: env::prompt_host()
                .or_else(env::hostname)
                .or_else(read_hostname)
                .unwrap_or_else(|| "nosh".to_string()),
            interfaces,
        }
    }

    /// `user@host` followed by the mode marker (`>` or `#`).
    pub fn prompt(&self, marker: char) -> String {
        format!("{}@{}{marker}", self.user, self.host)
    }
}

fn read_hostname() -> Option<String> {
    let name = std::fs::read_to_string("/etc/hostname").ok()?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}
