//! 类型化缓冲：在 [`ByteStore`] 之上提供偏移定址的端序读写、追加与切片。

#![allow(unsafe_code)]
// SAFETY: 本模块是 crate 中唯一的 `unsafe` 豁免点，仅用于有符号字节视图。
// ## 意图（Why）
// - `as_i8_slice` / `as_i8_mut_slice` 把有效数据区间按 `i8` 原地重解释，
//   避免为一次符号视角转换付出整段拷贝。
// ## 契约（What）
// - `u8` 与 `i8` 位宽、对齐、有效位模式完全一致，指针转换不产生未定义行为；
// - 两个视图都派生自同一借用（`&self` / `&mut self`），长度取自源切片，
//   不延长生命周期、不扩大区间，别名规则仍由借用检查器裁决。

use alloc::vec::Vec;

use crate::endian::{self, Endianness, WideScalar};
use crate::error::{AccessKind, BufferError, Result};
use crate::store::ByteStore;

/// `ByteBuffer` 是面向调用方的类型化字节缓冲。
///
/// # 设计背景（Why）
/// - 按组合独占一个 [`ByteStore`]：存储层负责内存从哪来、何时增长，
///   本层只补充两件事——**偏移边界检查**与**端序正确的类型化访问**，
///   职责边界清晰，失败路径统一落到 [`BufferError`]。
/// - 读写分两族：多字节标量走 [`WideScalar`] 端序转换路径，
///   8 位类型走单字节直通路径（无字节序歧义），集合封闭、编译期裁决。
///
/// # 契约说明（What）
/// - 所有定址访问要求 `offset + size_of(value) <= len()`，否则返回
///   [`BufferError::OutOfRange`]，缓冲状态不变——`write` 永不扩张、永不截断；
/// - `append_*` 族是唯一的增长入口：先经存储层 `resize` 确保可写区间，
///   再写入原末尾偏移；分配失败沿 [`BufferError::AllocationFailed`] 上抛，
///   缓冲保持最后一次一致状态；
/// - 任何增长操作都会使此前取得的切片视图失效——该别名规则由借用检查器
///   结构化保证（视图借用存续期间无法调用 `&mut self` 方法）。
///
/// # 风险提示（Trade-offs）
/// - [`slice`](Self::slice) 始终拷贝、绝不别名：返回值生命周期独立，
///   代价是一次分配；需要零拷贝顺序消费时应改用
///   [`StreamBuffer::borrowed`](crate::StreamBuffer::borrowed)。
#[derive(Debug, Default)]
pub struct ByteBuffer<'a> {
    store: ByteStore<'a>,
}

impl ByteBuffer<'static> {
    /// 创建空缓冲。
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: ByteStore::new(),
        }
    }

    /// 创建长度为 `len` 的零值缓冲。
    pub fn with_len(len: usize) -> Result<Self> {
        Self::filled(len, 0)
    }

    /// 创建长度为 `len`、以 `value` 填充的缓冲。
    pub fn filled(len: usize, value: u8) -> Result<Self> {
        Ok(Self {
            store: ByteStore::filled(len, value)?,
        })
    }

    /// 拷贝外部区间创建缓冲。
    pub fn from_slice(src: &[u8]) -> Result<Self> {
        Ok(Self {
            store: ByteStore::from_slice(src)?,
        })
    }
}

impl From<Vec<u8>> for ByteBuffer<'static> {
    /// 接管一个 `Vec` 的内容，不发生拷贝。
    fn from(vec: Vec<u8>) -> Self {
        Self {
            store: ByteStore::from(vec),
        }
    }
}

impl<'a> ByteBuffer<'a> {
    /// 借用外部区间创建缓冲：不拷贝，内部直接别名 `slice`。
    ///
    /// 容量固定为 `slice.len()`；一旦追加越过该容量，存储层发生
    /// copy-on-grow 提升，此后的变更不再触及外部内存。
    #[must_use]
    pub fn borrowed(slice: &'a mut [u8]) -> Self {
        Self {
            store: ByteStore::borrowed(slice),
        }
    }

    /// 当前逻辑长度（字节）。
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// 当前物理容量（字节）。
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// 逻辑长度是否为零。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// 是否仍在别名外部内存。
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        self.store.is_borrowed()
    }

    /// 有效数据的只读字节视图。
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.store.as_slice()
    }

    /// 有效数据的可写字节视图。
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.store.as_mut_slice()
    }

    /// 以有符号字节重解释有效数据：原地视图，不拷贝、不改变边界。
    #[must_use]
    pub fn as_i8_slice(&self) -> &[i8] {
        let bytes = self.as_slice();
        unsafe { core::slice::from_raw_parts(bytes.as_ptr().cast::<i8>(), bytes.len()) }
    }

    /// 以有符号字节重解释有效数据的可写视图：写入直接落在底层字节上。
    #[must_use]
    pub fn as_i8_mut_slice(&mut self) -> &mut [i8] {
        let bytes = self.as_mut_slice();
        unsafe { core::slice::from_raw_parts_mut(bytes.as_mut_ptr().cast::<i8>(), bytes.len()) }
    }

    /// 拷贝出有效数据的 `Vec`。
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// 调整逻辑长度（增长遵循存储层策略）。
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        self.store.resize(new_len)
    }

    /// 完全清空，回到初始空态。
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// 转发存储层的软压缩信号（带滞回）。
    pub fn shrink(&mut self) -> Result<()> {
        self.store.shrink()
    }

    /// 立即把容量压缩到逻辑长度。
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.store.shrink_to_fit()
    }

    /// 统一的偏移边界检查：要求 `offset + requested <= len`。
    fn check(&self, offset: usize, requested: usize) -> Result<()> {
        match offset.checked_add(requested) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(BufferError::OutOfRange {
                ident: self as *const Self as usize,
                access: AccessKind::Offset,
                len: self.len(),
                position: offset,
                requested,
            }),
        }
    }

    /// 按显式端序从 `offset` 处读出标量。
    fn read_order<T: WideScalar>(&self, offset: usize, order: Endianness) -> Result<T> {
        self.check(offset, T::WIDTH)?;
        Ok(T::read_from(&self.as_slice()[offset..], order))
    }

    /// 按本机字节序从 `offset` 处读出多字节标量。
    pub fn read<T: WideScalar>(&self, offset: usize) -> Result<T> {
        self.read_order(offset, endian::native())
    }

    /// 按小端字节序从 `offset` 处读出多字节标量。
    pub fn read_le<T: WideScalar>(&self, offset: usize) -> Result<T> {
        self.read_order(offset, Endianness::Little)
    }

    /// 按大端字节序从 `offset` 处读出多字节标量。
    pub fn read_be<T: WideScalar>(&self, offset: usize) -> Result<T> {
        self.read_order(offset, Endianness::Big)
    }

    /// 读出 `offset` 处的单个无符号字节（单字节直通路径，无端序转换）。
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        self.check(offset, 1)?;
        Ok(self.as_slice()[offset])
    }

    /// 读出 `offset` 处的单个有符号字节。
    pub fn read_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.read_u8(offset)? as i8)
    }

    /// 按显式端序在 `offset` 处原地写入标量。
    fn write_order<T: WideScalar>(
        &mut self,
        offset: usize,
        value: T,
        order: Endianness,
    ) -> Result<()> {
        self.check(offset, T::WIDTH)?;
        value.write_to(&mut self.as_mut_slice()[offset..], order);
        Ok(())
    }

    /// 按本机字节序在 `offset` 处原地写入多字节标量；越界即失败，永不扩张。
    pub fn write<T: WideScalar>(&mut self, offset: usize, value: T) -> Result<()> {
        self.write_order(offset, value, endian::native())
    }

    /// 按小端字节序在 `offset` 处原地写入多字节标量。
    pub fn write_le<T: WideScalar>(&mut self, offset: usize, value: T) -> Result<()> {
        self.write_order(offset, value, Endianness::Little)
    }

    /// 按大端字节序在 `offset` 处原地写入多字节标量。
    pub fn write_be<T: WideScalar>(&mut self, offset: usize, value: T) -> Result<()> {
        self.write_order(offset, value, Endianness::Big)
    }

    /// 在 `offset` 处写入单个无符号字节。
    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.check(offset, 1)?;
        self.as_mut_slice()[offset] = value;
        Ok(())
    }

    /// 在 `offset` 处写入单个有符号字节。
    pub fn write_i8(&mut self, offset: usize, value: i8) -> Result<()> {
        self.write_u8(offset, value as u8)
    }

    /// 从 `offset` 起批量写入一段字节（边界检查的原始拷贝）。
    pub fn write_bytes(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        self.check(offset, src.len())?;
        self.as_mut_slice()[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// 按显式端序在末尾追加标量：缓冲唯一的增长入口之一。
    fn append_order<T: WideScalar>(&mut self, value: T, order: Endianness) -> Result<()> {
        let offset = self.len();
        self.store.resize(offset + T::WIDTH)?;
        value.write_to(&mut self.as_mut_slice()[offset..], order);
        Ok(())
    }

    /// 按本机字节序在末尾追加多字节标量，必要时自动增长。
    pub fn append<T: WideScalar>(&mut self, value: T) -> Result<()> {
        self.append_order(value, endian::native())
    }

    /// 按小端字节序在末尾追加多字节标量。
    pub fn append_le<T: WideScalar>(&mut self, value: T) -> Result<()> {
        self.append_order(value, Endianness::Little)
    }

    /// 按大端字节序在末尾追加多字节标量。
    pub fn append_be<T: WideScalar>(&mut self, value: T) -> Result<()> {
        self.append_order(value, Endianness::Big)
    }

    /// 在末尾追加单个无符号字节。
    pub fn append_u8(&mut self, value: u8) -> Result<()> {
        self.store.push_byte(value)
    }

    /// 在末尾追加单个有符号字节。
    pub fn append_i8(&mut self, value: i8) -> Result<()> {
        self.store.push_byte(value as u8)
    }

    /// 在末尾追加一段字节。
    pub fn append_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.store.extend_from_slice(src)
    }

    /// 在末尾追加另一缓冲的全部有效内容。
    pub fn append_buffer(&mut self, other: &ByteBuffer<'_>) -> Result<()> {
        self.store.extend_from_slice(other.as_slice())
    }

    /// 拷贝出从 `offset` 起至多 `count` 字节的新缓冲。
    ///
    /// - 实际拷贝 `min(count, len - offset)` 字节；
    /// - 源为空或 `offset` 越过末尾时返回空缓冲；
    /// - 返回值始终自有内存、生命周期独立（绝不别名源缓冲）。
    pub fn slice(&self, offset: usize, count: usize) -> Result<ByteBuffer<'static>> {
        if self.is_empty() || offset >= self.len() {
            return Ok(ByteBuffer::new());
        }
        let count = count.min(self.len() - offset);
        ByteBuffer::from_slice(&self.as_slice()[offset..offset + count])
    }

    /// 以 `value` 填充从 `offset` 起的 `count` 字节。
    ///
    /// `count == 0` 或区间越过末尾时，填充长度收敛为 `len - offset`；
    /// `offset` 越过末尾时不做任何事。
    pub fn fill(&mut self, value: u8, offset: usize, count: usize) {
        let len = self.len();
        if offset >= len {
            return;
        }
        let count = match offset.checked_add(count) {
            Some(end) if count != 0 && end <= len => count,
            _ => len - offset,
        };
        self.as_mut_slice()[offset..offset + count].fill(value);
    }
}

impl PartialEq<ByteBuffer<'_>> for ByteBuffer<'_> {
    /// 两缓冲相等当且仅当长度相等且每个对应字节相等；容量与借用状态不参与比较。
    fn eq(&self, other: &ByteBuffer<'_>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer<'_> {}
