pub mod money;
pub mod tabs;
