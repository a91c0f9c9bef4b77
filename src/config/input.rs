//! Key binding options for gotry
//!
//! Each field is a list of key strings understood by [crate::app::parse_key].

use serde::Deserialize;

/// `[keys]` section of the config
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Keys {
    select: Vec<String>,
    up: Vec<String>,
    down: Vec<String>,
    cancel: Vec<String>,
    delete: Vec<String>,
    toggle_mark: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(select, up, down, cancel, delete, toggle_mark);

impl Default for Keys {
    fn default() -> Self {
        let s = |v: &str| v.to_string();
        Keys {
            select: vec![s("enter")],
            up: vec![s("up"), s("ctrl+p")],
            down: vec![s("down"), s("ctrl+n")],
            cancel: vec![s("esc"), s("ctrl+c")],
            delete: vec![s("ctrl+d")],
            toggle_mark: vec![s("space"), s("ctrl+d")],
        }
    }
}
