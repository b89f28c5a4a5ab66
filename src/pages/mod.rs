//! 页面对象：只描述元素在哪里，不包含流程

pub mod job;
pub mod login;
pub mod overlay;
pub mod profile;
pub mod search;

pub use job::JobPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use search::SearchPage;
