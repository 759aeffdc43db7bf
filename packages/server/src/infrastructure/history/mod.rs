//! History Store 実装
//!
//! ドメイン層が定義する HistoryStore trait の具体的な実装を提供します。
//! 外部ストアが失敗してもライブ配信には影響しない、という境界の
//! 性質はこの実装ではなく呼び出し側（UseCase 層)が保証します。

pub mod inmemory;

pub use inmemory::InMemoryHistoryStore;
