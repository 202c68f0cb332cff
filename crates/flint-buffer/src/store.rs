//! 可增长字节存储：缓冲层唯一持有内存、唯一发生增长/压缩/所有权迁移的地方。

use alloc::vec::Vec;

use crate::error::{BufferError, Result};

/// 存储后端的两种形态。
///
/// - `Owned`：自有堆内存。内部 `Vec` 的长度即物理容量（整段零初始化），
///   逻辑长度由外层 [`ByteStore::len`] 单独记账，使容量核算精确可控，
///   不受 `Vec` 自身摊销策略影响；
/// - `Borrowed`：别名外部内存，不拥有、不释放。任何越过当前容量的变更
///   都会将数据复制进新分配的自有内存并切换到 `Owned`（copy-on-grow）。
#[derive(Debug)]
enum Storage<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

/// `ByteStore` 是缓冲层的核心容器：一段连续字节区间，区分逻辑长度与物理容量。
///
/// # 设计背景（Why）
/// - 上层的 [`ByteBuffer`](crate::ByteBuffer) 只负责类型化读写与边界检查，
///   所有"内存从哪来、何时增长、何时归还"的决策都收敛在本类型，
///   保证增长/压缩是仅有的变更点，不存在悬垂视图。
/// - 借用态与自有态统一为一个类型加状态标签，而不是两个容器类型：
///   借用→自有的提升是一次显式、可测试的状态转换。
///
/// # 契约说明（What）
/// - 不变式：`len <= capacity`；`capacity == 0` 当且仅当存储为空的自有区间；
///   借用态下 `data` 永不被本类型释放。
/// - 借用态的提升发生在任何需要超出当前容量的调用中；提升之后，
///   后续变更不再触及最初引用的外部内存——这是调用方必须理解的别名规则，
///   借用检查器保证外部区间在本存储存活期间不会被旁路修改。
/// - 增长暴露出来的新字节为零值（安全 Rust 不允许暴露未初始化内存）；
///   逻辑长度先缩后涨时，旧字节会原样重现，调用方写前不应读。
///
/// # 风险提示（Trade-offs）
/// - 自有态以 `Vec` 长度充当物理容量，意味着增长会对新区间做一次零填充；
///   换来的是 `capacity()` 与增长策略完全由本类型说了算。
#[derive(Debug)]
pub struct ByteStore<'a> {
    storage: Storage<'a>,
    len: usize,
    shrink_counter: u32,
}

impl ByteStore<'static> {
    /// 创建空存储。
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Storage::Owned(Vec::new()),
            len: 0,
            shrink_counter: 0,
        }
    }

    /// 创建长度为 `len`、以 `value` 填充的存储。
    ///
    /// 物理容量遵循增长策略（不小于 [`Self::MIN_RESERVE`]）；分配失败返回
    /// [`BufferError::AllocationFailed`]。
    pub fn filled(len: usize, value: u8) -> Result<Self> {
        let mut store = Self::new();
        store.resize(len)?;
        store.as_mut_slice().fill(value);
        Ok(store)
    }

    /// 拷贝外部区间创建存储，之后与外部内存再无关联。
    pub fn from_slice(src: &[u8]) -> Result<Self> {
        let mut store = Self::new();
        store.extend_from_slice(src)?;
        Ok(store)
    }
}

impl From<Vec<u8>> for ByteStore<'static> {
    /// 接管一个 `Vec` 的内容，逻辑长度与物理容量均为 `vec.len()`。
    fn from(vec: Vec<u8>) -> Self {
        Self {
            len: vec.len(),
            storage: Storage::Owned(vec),
            shrink_counter: 0,
        }
    }
}

impl<'a> ByteStore<'a> {
    /// 增长时的最小物理容量（元素数下限），避免小容量场景反复重分配。
    ///
    /// 与 [`Self::SHRINK_TRIGGER`] 同为实现调优常量，不属于对外行为契约。
    pub const MIN_RESERVE: usize = 32;

    /// 连续收缩信号的触发阈值：第 `SHRINK_TRIGGER + 1` 次满足条件的
    /// [`shrink`](Self::shrink) 调用才真正压缩容量。
    pub const SHRINK_TRIGGER: u32 = 2;

    /// 借用外部区间创建存储：不拷贝，逻辑长度与容量即 `slice.len()`。
    ///
    /// 空切片退化为普通的空存储（无借用标记），与空区间 `capacity == 0`
    /// 的不变式保持一致。
    #[must_use]
    pub fn borrowed(slice: &'a mut [u8]) -> Self {
        if slice.is_empty() {
            return ByteStore::new();
        }
        let len = slice.len();
        Self {
            storage: Storage::Borrowed(slice),
            len,
            shrink_counter: 0,
        }
    }

    /// 当前逻辑长度（字节）。
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 当前物理容量（字节）。
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Owned(vec) => vec.len(),
            Storage::Borrowed(slice) => slice.len(),
        }
    }

    /// 逻辑长度是否为零。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 是否仍在别名外部内存（尚未发生 copy-on-grow 提升）。
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }

    /// 有效数据区间的只读视图（前 `len` 字节）。
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(vec) => &vec[..self.len],
            Storage::Borrowed(slice) => &slice[..self.len],
        }
    }

    /// 有效数据区间的可写视图。
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Owned(vec) => &mut vec[..self.len],
            Storage::Borrowed(slice) => &mut slice[..self.len],
        }
    }

    /// 整段物理容量的可写视图（含逻辑长度之外的区间），供内部追加路径使用。
    fn raw_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Owned(vec) => vec.as_mut_slice(),
            Storage::Borrowed(slice) => slice,
        }
    }

    /// 调整物理容量。
    ///
    /// # 执行逻辑（How）
    /// - `new_capacity == capacity`：直接返回；
    /// - 增长：目标容量取 `max(new_capacity, 2 * capacity, MIN_RESERVE)`
    ///   （倍增策略 + 下限，避免病态的小步重分配）；
    /// - 收缩：容量精确设为 `new_capacity`。
    ///
    /// 自有态通过 `try_reserve_exact` 申请内存；借用态则分配目标容量的
    /// 自有内存、拷入前 `len` 字节并清除借用标记（copy-on-grow 提升）。
    ///
    /// # 契约说明（What）
    /// - 分配失败返回 [`BufferError::AllocationFailed`]，存储保持调用前状态；
    /// - 成功后 `capacity()` 即为计算出的目标容量，已有数据原样保留；
    /// - 收缩到逻辑长度之下时，逻辑长度同步截断到新容量，
    ///   维持不变式 `len <= capacity`（尾部数据被丢弃）。
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        let capacity = self.capacity();
        if new_capacity == capacity {
            return Ok(());
        }
        let target = if new_capacity > capacity {
            new_capacity
                .max(capacity.saturating_mul(2))
                .max(Self::MIN_RESERVE)
        } else {
            new_capacity
        };

        match &mut self.storage {
            Storage::Owned(vec) => {
                if target > vec.len() {
                    let additional = target - vec.len();
                    vec.try_reserve_exact(additional)
                        .map_err(|_| BufferError::AllocationFailed { requested: target })?;
                    vec.resize(target, 0);
                } else {
                    vec.truncate(target);
                    vec.shrink_to_fit();
                }
            }
            Storage::Borrowed(slice) => {
                let mut owned = Vec::new();
                owned
                    .try_reserve_exact(target)
                    .map_err(|_| BufferError::AllocationFailed { requested: target })?;
                owned.resize(target, 0);
                let keep = self.len.min(target);
                owned[..keep].copy_from_slice(&slice[..keep]);
                self.storage = Storage::Owned(owned);
            }
        }
        // 不变式 len <= capacity：收缩越过逻辑长度时同步截断。
        self.len = self.len.min(target);
        Ok(())
    }

    /// 调整逻辑长度。
    ///
    /// - `new_len == 0`：完全清空（释放自有内存、解除借用）；
    /// - `new_len > capacity`：先按增长策略 [`reserve`](Self::reserve)；
    /// - 随后无条件设置 `len = new_len`。新暴露的字节为零值或此前写过的旧值，
    ///   追加/写入方写前不应读取。
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        if new_len == 0 {
            self.clear();
            return Ok(());
        }
        if new_len > self.capacity() {
            self.reserve(new_len)?;
        }
        self.len = new_len;
        Ok(())
    }

    /// 追加单个字节，必要时按增长策略扩容。
    pub fn push_byte(&mut self, value: u8) -> Result<()> {
        let end = self.len;
        self.resize(end + 1)?;
        self.raw_mut()[end] = value;
        Ok(())
    }

    /// 追加另一存储的全部有效内容。
    pub fn push_store(&mut self, other: &ByteStore<'_>) -> Result<()> {
        self.extend_from_slice(other.as_slice())
    }

    /// 追加一段外部字节。
    pub fn extend_from_slice(&mut self, src: &[u8]) -> Result<()> {
        if src.is_empty() {
            return Ok(());
        }
        let end = self.len;
        self.resize(end + src.len())?;
        self.raw_mut()[end..end + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// 软压缩信号：带滞回的容量回收提示。
    ///
    /// 满足 `len > 0 && len < 2 * capacity` 时累计内部计数器；连续信号超过
    /// [`Self::SHRINK_TRIGGER`] 次才将容量压缩到恰好 `len` 并清零计数器，
    /// 避免每次信号都触发重分配造成容量抖动。不满足条件时计数器归零。
    pub fn shrink(&mut self) -> Result<()> {
        if self.len > 0 && self.len < self.capacity().saturating_mul(2) {
            self.shrink_counter += 1;
            if self.shrink_counter > Self::SHRINK_TRIGGER {
                self.reserve(self.len)?;
                self.shrink_counter = 0;
            }
        } else {
            self.shrink_counter = 0;
        }
        Ok(())
    }

    /// 立即压缩：无滞回地将容量压到恰好 `len`，并复位收缩计数器。
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.len > 0 {
            self.reserve(self.len)?;
        }
        self.shrink_counter = 0;
        Ok(())
    }

    /// 完全清空：释放自有内存，解除借用，回到初始空态。
    pub fn clear(&mut self) {
        self.storage = Storage::Owned(Vec::new());
        self.len = 0;
        self.shrink_counter = 0;
    }
}

impl Default for ByteStore<'_> {
    fn default() -> Self {
        Self {
            storage: Storage::Owned(Vec::new()),
            len: 0,
            shrink_counter: 0,
        }
    }
}
