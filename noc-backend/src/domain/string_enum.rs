// noc-backend/src/domain/string_enum.rs

//! 表示文字列でDBに保存される列挙型の共通定義
//!
//! 優先度やステータスは `"In Progress"` のような表示名のまま保存・送受信するため、
//! 文字列との相互変換をまとめてマクロで生成します。

/// 表示文字列と相互変換できる列挙型を定義する
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// 文字列から変換（大文字小文字は区別しない）
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            /// DBに保存する表示文字列
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// すべての有効な値
            pub fn all() -> Vec<Self> {
                vec![$(Self::$variant),+]
            }

            /// エラーメッセージ用の有効値一覧
            pub fn valid_values() -> String {
                Self::all()
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_str(s).ok_or_else(|| {
                    format!(
                        "Invalid {}: '{}'. Valid values are: {}",
                        $kind,
                        s,
                        Self::valid_values()
                    )
                })
            }
        }

        // データベースとの変換用
        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}
