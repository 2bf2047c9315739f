#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use rv_reflect as reflect;
pub use rv_utils as utils;
