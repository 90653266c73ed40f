//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录、注册、当前用户
//! - [`access`] - 授权策略探测
//! - [`employees`] - 员工管理接口
//! - [`teams`] - 团队管理接口
//! - [`time_off`] - 请假申请与审批
//! - [`dashboard`] - 仪表盘汇总
//!
//! 所有响应使用 [`crate::ApiResponse`] 包装。

pub mod access;
pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod teams;
pub mod time_off;
