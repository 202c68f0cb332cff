use core::fmt;

/// 标识一次越界访问所针对的定位方式。
///
/// - `Offset`：调用方显式传入的偏移量（[`ByteBuffer`](crate::ByteBuffer) 的定址读写）；
/// - `ReadCursor` / `WriteCursor`：[`StreamBuffer`](crate::StreamBuffer) 内部维护的读/写游标。
///
/// 区分三者可以让排障方直接从错误输出判断是偏移计算错误，还是流式消费越过了构造时的容量上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// 定址访问：调用方传入的字节偏移。
    Offset,
    /// 流式读取游标。
    ReadCursor,
    /// 流式写入游标。
    WriteCursor,
}

impl AccessKind {
    /// 返回用于错误信息拼装的稳定字段名。
    fn field_name(self) -> &'static str {
        match self {
            AccessKind::Offset => "offset",
            AccessKind::ReadCursor => "read_index",
            AccessKind::WriteCursor => "write_index",
        }
    }
}

/// `BufferError` 是缓冲层全部失败路径的统一错误域。
///
/// # 设计背景（Why）
/// - 缓冲层只有两类可观测故障：**越界访问**与**分配失败**。两者的处置策略完全不同
///   （前者通常意味着调用方的偏移计算或协议解析存在缺陷，后者属于资源压力），
///   因此必须在类型层面可区分，而不是靠解析消息字符串。
/// - 错误携带的字段面向诊断而非程序化分支：调用方拿到 `OutOfRange` 后应当修正逻辑或中止本次操作，
///   而不是据此重试。
///
/// # 契约说明（What）
/// - `OutOfRange`：请求的字节区间超出缓冲当前逻辑长度。携带缓冲地址（`ident`）、
///   定位方式（`access`）、当前长度、访问位置与请求字节数，任何一次失败都不会改变缓冲状态。
/// - `AllocationFailed`：增长或压缩时无法获得内存。`requested` 为目标物理容量；
///   失败后缓冲保持最后一次一致的 `len`/`capacity`，绝不出现"长度已更新、容量未就绪"的中间态。
///
/// # 风险提示（Trade-offs）
/// - `ident` 记录的是失败瞬间的缓冲地址，仅用于在日志中区分同类缓冲实例；
///   缓冲被移动后地址会变化，不能作为长期标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// 访问的字节区间超出缓冲当前逻辑长度。
    OutOfRange {
        /// 失败瞬间的缓冲地址，用于日志中区分实例。
        ident: usize,
        /// 越界访问的定位方式。
        access: AccessKind,
        /// 缓冲当前逻辑长度。
        len: usize,
        /// 访问的起始位置（偏移或游标）。
        position: usize,
        /// 本次访问需要的字节数。
        requested: usize,
    },
    /// 增长或压缩时无法获得内存。
    AllocationFailed {
        /// 请求的目标物理容量（单位：字节）。
        requested: usize,
    },
}

impl BufferError {
    /// 判断是否为越界访问，便于测试与上层断言。
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, BufferError::OutOfRange { .. })
    }

    /// 判断是否为分配失败。
    #[must_use]
    pub fn is_allocation_failed(&self) -> bool {
        matches!(self, BufferError::AllocationFailed { .. })
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::OutOfRange {
                ident,
                access,
                len,
                position,
                requested,
            } => write!(
                f,
                "缓冲越界访问：buffer={ident:#x}, size={len}, {}={position}, need_size={requested}",
                access.field_name(),
            ),
            BufferError::AllocationFailed { requested } => {
                write!(f, "缓冲分配失败：无法获得 {requested} 字节物理容量")
            }
        }
    }
}

impl core::error::Error for BufferError {}

/// `Result` 为缓冲层统一的返回值别名，默认错误类型为 [`BufferError`]。
pub type Result<T, E = BufferError> = core::result::Result<T, E>;
