//! Educa - 在线课程管理后端
//!
//! 讲师创建课程，课程下有有序的模块，模块下有有序的内容；
//! 每条内容指向一个具体条目（文本、文件、图片、视频）。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），缓存按 token 解析出的用户
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM），负责排序分配与所有权过滤
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
