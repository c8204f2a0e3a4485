//! Bilingual error definitions.
//!
//! Errors are identified by a numeric [`ErrorCode`] and carry two messages:
//! a localized one (`err_msg`) and an English one (`err_msg_en`). The
//! canonical pair for each code lives in an [`ErrorRegistry`]; callers obtain
//! [`ErrorValue`]s through an [`ErrorFactory`].
//!
//! # Wire format
//!
//! ```text
//! {"err_code":1001,"err_msg":"参数错误","err_msg_en":"invalid parameter"}
//! ```
//!
//! # Display format
//!
//! ```text
//! ErrCode [1001]
//! ErrMsg: 参数错误
//! ErrMsgEn: invalid parameter
//! ```

pub mod catalog;
pub mod custom;
pub mod factory;
pub mod template;
pub mod value;

pub use catalog::{BaseMessage, ErrorCode, ErrorRegistry, RegistryBuilder};
pub use custom::CustomMessage;
pub use factory::ErrorFactory;
pub use template::{FormatArg, sprintf};
pub use value::{ErrorValue, UNKNOWN_ERROR_MSG, UNKNOWN_ERROR_MSG_EN};
