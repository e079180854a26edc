//! 远程编辑客户端接口
//!
//! 编排层只依赖这个 trait，真实的生成式服务和测试替身都实现它。

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::GlobalConfig;

/// 远程编辑客户端
///
/// 两个调用相互独立，可以同时发出，彼此之间没有顺序保证。
#[async_trait]
pub trait RemoteEditClient: Send + Sync {
    /// 改写描述
    ///
    /// 永远不会失败：远程出错时原样返回输入。
    async fn rewrite(&self, description: &str) -> String;

    /// 按风格指令编辑图片，返回 data URL
    ///
    /// 远程出错或没有返回图片数据时返回错误。
    async fn edit(&self, image: &str, config: &GlobalConfig) -> AppResult<String>;
}
