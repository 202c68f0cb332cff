//! 端序编解码原语：在调用方提供的内存区间与定宽标量之间做字节序正确的转换。
//!
//! # 模块定位（Why）
//! - 缓冲层的所有多字节读写最终都落到"按指定字节序复制 N 字节"这一个动作上。
//!   将其收敛为无状态的纯函数族，可以让 [`ByteBuffer`](crate::ByteBuffer) 与
//!   [`StreamBuffer`](crate::StreamBuffer) 只负责边界检查与游标推进。
//! - 本机字节序在进程生命周期内不变，因此只探测一次并缓存为进程级常量。
//!
//! # 契约说明（What）
//! - 支持的定宽标量集合封闭：16/32/64 位有无符号整数与 32/64 位浮点，
//!   由密封 trait [`WideScalar`] 在编译期裁决；8 位类型没有字节序歧义，
//!   不属于该集合，由缓冲层的单字节直通路径处理。
//! - 本模块不做边界检查：`read_from`/`write_to` 要求切片长度至少为
//!   [`WideScalar::WIDTH`]，由调用方在进入前保证（缓冲层统一完成检查）。

use crate::sealed;

/// 字节序选择：大端（最高有效字节在前）或小端（最低有效字节在前）。
///
/// 显式传入 `Big`/`Little` 的调用始终按请求的字节序执行，与宿主机无关；
/// 需要跟随宿主机时使用 [`native`] 解析出的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// 大端：最高有效字节在最低地址。
    Big,
    /// 小端：最低有效字节在最低地址。
    Little,
}

/// 返回运行期探测到的本机字节序。
///
/// # 执行逻辑（How）
/// - 取多字节常量 `0x0102_0304u32` 的本机字节表示，检查首字节是否为最高有效字节；
/// - 结果缓存在 `spin::Once` 中：惰性初始化、初始化后不可变、跨线程读取安全，
///   在 `no_std` 配置下同样可用。
///
/// # 契约说明（What）
/// - 进程内多次调用恒返回同一值；探测本身无副作用。
pub fn native() -> Endianness {
    static NATIVE: spin::Once<Endianness> = spin::Once::new();
    *NATIVE.call_once(|| {
        let probe: u32 = 0x0102_0304;
        if probe.to_ne_bytes()[0] == 0x01 {
            Endianness::Big
        } else {
            Endianness::Little
        }
    })
}

/// `WideScalar` 圈定可参与端序转换的定宽多字节标量。
///
/// # 设计背景（Why）
/// - 原始需求是"不支持的类型在编译期被拒绝"：通过密封 supertrait，
///   集合之外的类型（包括 `u8`/`i8`）无法实现本 trait，调用点直接无法通过类型检查。
/// - 8 位类型被刻意排除：它们没有字节序歧义，走转换路径只会掩盖调用方的类型错误。
///
/// # 契约说明（What）
/// - `WIDTH`：标量的字节宽度，恒等于 `size_of::<Self>()`。
/// - `read_from(src, order)`：从 `src` 前 `WIDTH` 字节按 `order` 解出标量；
///   要求 `src.len() >= WIDTH`，否则 panic（由缓冲层的边界检查保证不会发生）。
/// - `write_to(dst, order)`：对称的写入路径，同样要求 `dst.len() >= WIDTH`。
pub trait WideScalar: sealed::Sealed + Copy {
    /// 标量的字节宽度。
    const WIDTH: usize;

    /// 从 `src` 的前 [`Self::WIDTH`] 字节按 `order` 读出标量。
    fn read_from(src: &[u8], order: Endianness) -> Self;

    /// 将标量按 `order` 写入 `dst` 的前 [`Self::WIDTH`] 字节。
    fn write_to(self, dst: &mut [u8], order: Endianness);
}

macro_rules! impl_wide_scalar {
    ($($ty:ty => $width:expr),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl WideScalar for $ty {
            const WIDTH: usize = $width;

            fn read_from(src: &[u8], order: Endianness) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&src[..$width]);
                match order {
                    Endianness::Big => <$ty>::from_be_bytes(raw),
                    Endianness::Little => <$ty>::from_le_bytes(raw),
                }
            }

            fn write_to(self, dst: &mut [u8], order: Endianness) {
                let raw = match order {
                    Endianness::Big => self.to_be_bytes(),
                    Endianness::Little => self.to_le_bytes(),
                };
                dst[..$width].copy_from_slice(&raw);
            }
        }
    )*};
}

impl_wide_scalar! {
    i16 => 2,
    u16 => 2,
    i32 => 4,
    u32 => 4,
    i64 => 8,
    u64 => 8,
    f32 => 4,
    f64 => 8,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 本机字节序探测应当与标准库的字节表示一致，且多次调用返回同一值。
    #[test]
    fn native_detection_matches_ne_bytes_and_is_memoized() {
        let expected = if u16::from_ne_bytes([0x01, 0x02]) == 0x0102 {
            Endianness::Big
        } else {
            Endianness::Little
        };
        assert_eq!(native(), expected);
        assert_eq!(native(), native());
    }

    /// 显式大小端读取必须无视宿主机字节序：同一区间按两种端序解出互为字节反转的值。
    #[test]
    fn explicit_orders_ignore_host_order() {
        let raw = [0xff, 0xee];
        assert_eq!(u16::read_from(&raw, Endianness::Big), 0xffee);
        assert_eq!(u16::read_from(&raw, Endianness::Little), 0xeeff);
    }

    /// 写入后按同一端序读回应当得到原值，浮点按位模式保持。
    #[test]
    fn write_then_read_round_trips_scalars() {
        let mut raw = [0u8; 8];
        (-12345i64).write_to(&mut raw, Endianness::Little);
        assert_eq!(i64::read_from(&raw, Endianness::Little), -12345);

        let mut raw = [0u8; 8];
        (-0.0f64).write_to(&mut raw, Endianness::Big);
        let back = f64::read_from(&raw, Endianness::Big);
        assert_eq!(back.to_bits(), (-0.0f64).to_bits());
    }
}
