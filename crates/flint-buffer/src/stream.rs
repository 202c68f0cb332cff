//! 流式游标缓冲：以独立读/写游标将定址访问转为顺序访问。

use crate::buffer::ByteBuffer;
use crate::endian::{self, Endianness, WideScalar};
use crate::error::{AccessKind, BufferError, Result};

/// `StreamBuffer` 在一个固定容量的 [`ByteBuffer`] 上维护互不干扰的读/写游标。
///
/// # 设计背景（Why）
/// - 协议顺序编解码时，调用方不应自行记账偏移：每次访问自动推进对应游标，
///   以 [`read_eof`](Self::read_eof) / [`write_eof`](Self::write_eof)
///   驱动消费循环，无需另行维护长度。
/// - 读写游标相互独立：同一缓冲可以先顺序写满、再从头顺序读出，
///   两个方向的进度互不干扰。
///
/// # 契约说明（What）
/// - 不变式：`read_pos`、`write_pos` 单调不减，从 0 起步；
///   "读到尾"即 `read_pos >= len`，"写到尾"即 `write_pos >= len`。
/// - 流式写入**绝不增长**底层缓冲：构造时的长度就是硬上限，
///   越界写返回 [`BufferError::OutOfRange`]（`WriteCursor`），游标不动。
/// - 每次失败携带当前长度、游标与请求字节数，供诊断使用；
///   失败不可在本层重试，由调用方决定中止或换路径。
#[derive(Debug, Default)]
pub struct StreamBuffer<'a> {
    buffer: ByteBuffer<'a>,
    read_pos: usize,
    write_pos: usize,
}

impl StreamBuffer<'static> {
    /// 创建空流缓冲（长度为零：任何读写都立即到尾）。
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: ByteBuffer::new(),
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// 创建长度为 `len`、以 `value` 预填充的流缓冲，游标从 0 开始。
    pub fn filled(len: usize, value: u8) -> Result<Self> {
        Ok(Self {
            buffer: ByteBuffer::filled(len, value)?,
            read_pos: 0,
            write_pos: 0,
        })
    }

    /// 拷贝外部区间创建流缓冲。
    pub fn from_slice(src: &[u8]) -> Result<Self> {
        Ok(Self {
            buffer: ByteBuffer::from_slice(src)?,
            read_pos: 0,
            write_pos: 0,
        })
    }
}

impl<'a> StreamBuffer<'a> {
    /// 借用外部区间创建流缓冲：零拷贝顺序解码外部所有的内存区间。
    #[must_use]
    pub fn borrowed(slice: &'a mut [u8]) -> Self {
        Self {
            buffer: ByteBuffer::borrowed(slice),
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// 底层缓冲长度是否为零。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 读游标是否已到（或越过）末尾。
    #[must_use]
    pub fn read_eof(&self) -> bool {
        self.read_pos >= self.buffer.len()
    }

    /// 写游标是否已到（或越过）末尾。
    #[must_use]
    pub fn write_eof(&self) -> bool {
        self.write_pos >= self.buffer.len()
    }

    /// 当前读游标。
    #[must_use]
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// 当前写游标。
    #[must_use]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// 访问底层缓冲。
    #[must_use]
    pub fn buffer(&self) -> &ByteBuffer<'a> {
        &self.buffer
    }

    /// 可写地访问底层缓冲（定址读写不影响游标）。
    #[must_use]
    pub fn buffer_mut(&mut self) -> &mut ByteBuffer<'a> {
        &mut self.buffer
    }

    /// 消耗自身，取回底层缓冲。
    #[must_use]
    pub fn into_inner(self) -> ByteBuffer<'a> {
        self.buffer
    }

    /// 读方向的边界检查：要求 `read_pos + requested <= len`，失败时游标不动。
    fn check_read(&self, requested: usize) -> Result<()> {
        match self.read_pos.checked_add(requested) {
            Some(end) if end <= self.buffer.len() => Ok(()),
            _ => Err(BufferError::OutOfRange {
                ident: self as *const Self as usize,
                access: AccessKind::ReadCursor,
                len: self.buffer.len(),
                position: self.read_pos,
                requested,
            }),
        }
    }

    /// 写方向的边界检查。
    fn check_write(&self, requested: usize) -> Result<()> {
        match self.write_pos.checked_add(requested) {
            Some(end) if end <= self.buffer.len() => Ok(()),
            _ => Err(BufferError::OutOfRange {
                ident: self as *const Self as usize,
                access: AccessKind::WriteCursor,
                len: self.buffer.len(),
                position: self.write_pos,
                requested,
            }),
        }
    }

    /// 按显式端序顺序读出标量并推进读游标。
    fn read_order<T: WideScalar>(&mut self, order: Endianness) -> Result<T> {
        self.check_read(T::WIDTH)?;
        let value = T::read_from(&self.buffer.as_slice()[self.read_pos..], order);
        self.read_pos += T::WIDTH;
        Ok(value)
    }

    /// 按本机字节序顺序读出多字节标量。
    pub fn read<T: WideScalar>(&mut self) -> Result<T> {
        self.read_order(endian::native())
    }

    /// 按小端字节序顺序读出多字节标量。
    pub fn read_le<T: WideScalar>(&mut self) -> Result<T> {
        self.read_order(Endianness::Little)
    }

    /// 按大端字节序顺序读出多字节标量。
    pub fn read_be<T: WideScalar>(&mut self) -> Result<T> {
        self.read_order(Endianness::Big)
    }

    /// 顺序读出单个无符号字节（直通路径），读游标前进 1。
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check_read(1)?;
        let value = self.buffer.as_slice()[self.read_pos];
        self.read_pos += 1;
        Ok(value)
    }

    /// 顺序读出单个有符号字节。
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// 按显式端序顺序写入标量并推进写游标。
    fn write_order<T: WideScalar>(&mut self, value: T, order: Endianness) -> Result<()> {
        self.check_write(T::WIDTH)?;
        let offset = self.write_pos;
        value.write_to(&mut self.buffer.as_mut_slice()[offset..], order);
        self.write_pos += T::WIDTH;
        Ok(())
    }

    /// 按本机字节序顺序写入多字节标量；构造时长度是硬上限，越界即失败。
    pub fn write<T: WideScalar>(&mut self, value: T) -> Result<()> {
        self.write_order(value, endian::native())
    }

    /// 按小端字节序顺序写入多字节标量。
    pub fn write_le<T: WideScalar>(&mut self, value: T) -> Result<()> {
        self.write_order(value, Endianness::Little)
    }

    /// 按大端字节序顺序写入多字节标量。
    pub fn write_be<T: WideScalar>(&mut self, value: T) -> Result<()> {
        self.write_order(value, Endianness::Big)
    }

    /// 顺序写入单个无符号字节，写游标前进 1。
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.check_write(1)?;
        let offset = self.write_pos;
        self.buffer.as_mut_slice()[offset] = value;
        self.write_pos += 1;
        Ok(())
    }

    /// 顺序写入单个有符号字节。
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// 批量顺序写入一段字节，写游标前进 `src.len()`。
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.check_write(src.len())?;
        let offset = self.write_pos;
        self.buffer.as_mut_slice()[offset..offset + src.len()].copy_from_slice(src);
        self.write_pos += src.len();
        Ok(())
    }
}
