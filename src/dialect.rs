//! Dialect：标识符引号、行分隔符与 upsert 能力的外部协作接口。

use crate::flavor::Flavor;
use dyn_clone::DynClone;

/// 构建器依赖的方言协作接口。
///
/// `quote` 必须是确定性的纯函数；`line_separator` 只影响排版，不影响语义。
pub trait Dialect: DynClone + std::fmt::Debug {
    /// 为单个裸标识符加引号（列名、表名各调用一次）。
    fn quote(&self, ident: &str) -> String;

    /// 多行 INSERT 各段之间的分隔符。
    fn line_separator(&self) -> &str {
        "\n"
    }

    /// 是否接受 `ON DUPLICATE KEY UPDATE`。
    fn supports_on_duplicate_key(&self) -> bool {
        false
    }
}

dyn_clone::clone_trait_object!(Dialect);

impl Dialect for Flavor {
    fn quote(&self, ident: &str) -> String {
        Flavor::quote(*self, ident)
    }

    fn supports_on_duplicate_key(&self) -> bool {
        Flavor::supports_on_duplicate_key(*self)
    }
}
