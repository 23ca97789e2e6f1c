//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリを使った実装（再起動で空に戻る）

pub mod inmemory;

pub use inmemory::InMemoryHubRepository;
