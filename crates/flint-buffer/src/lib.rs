#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # flint-buffer
//!
//! ## 教案目的（Why）
//! - **定位**：底层二进制缓冲原语——可增长（自有/借用）字节容器、端序正确的
//!   类型化读写，以及其上的流式游标层。它是协议编解码库赖以构建的
//!   字节寻址存储与访问层，本身不定义任何帧格式或 schema。
//! - **架构角色**：三层组合、逐层收窄职责——[`ByteStore`] 独占内存与
//!   增长/压缩/所有权迁移决策；[`ByteBuffer`] 补充偏移边界检查与端序访问；
//!   [`StreamBuffer`] 把偏移定址转为游标顺序访问。
//! - **设计策略**：借用与自有统一为一个带状态标签的容器，借用态越过容量即
//!   copy-on-grow 提升为自有态——这是本 crate 唯一的隐式状态迁移，
//!   也是调用方必须理解的别名规则。
//!
//! ## 交互契约（What）
//! - **支持的标量集合**（封闭，编译期裁决）：端序转换路径覆盖
//!   16/32/64 位有无符号整数与 32/64 位浮点（[`WideScalar`]）；
//!   8 位类型走单字节直通路径，不做端序转换。
//! - **字节序选择**：`native`（运行期探测一次并缓存）、显式大端、显式小端；
//!   显式调用始终按请求端序执行，与宿主机无关。
//! - **失败面**：全部失败同步上抛为 [`BufferError`]——越界访问携带缓冲地址、
//!   当前长度、访问位置与请求字节数；分配失败与之可区分。
//!   越界失败不改变缓冲状态；分配失败保持最后一次一致的长度/容量。
//!
//! ## 实现策略（How）
//! - 定址 `write` 永不增长，`append_*` 族是唯一的增长触发点；
//!   流式层构造时长度即硬上限，写越界即失败。
//! - 增长遵循倍增加下限策略（[`ByteStore::MIN_RESERVE`]）；
//!   软压缩带滞回（[`ByteStore::SHRINK_TRIGGER`]），`shrink_to_fit` 立即压缩。
//!
//! ## 风险提示（Trade-offs）
//! - 单线程语义：缓冲不支持并发变更，需要共享时由调用方在外部串行化；
//!   借用态的外部区间由借用检查器保证存续期内不被旁路修改。
//! - 任何增长都会使此前取得的视图失效——同样由借用检查器结构化兜底，
//!   不依赖文档约定。

extern crate alloc;

/// 密封模块：圈定 [`WideScalar`] 的合法实现集合，crate 之外无法扩充。
mod sealed {
    /// 实现许可标记，仅由本 crate 内的定宽标量实现。
    pub trait Sealed {}
}

pub mod buffer;
pub mod endian;
pub mod error;
pub mod store;
pub mod stream;

pub use buffer::ByteBuffer;
pub use endian::{Endianness, WideScalar, native};
pub use error::{AccessKind, BufferError, Result};
pub use store::ByteStore;
pub use stream::StreamBuffer;
