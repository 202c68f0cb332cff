//! `stream_contract` 集成测试：聚焦 [`StreamBuffer`] 的游标契约。
//!
//! # 测试总览（Why）
//! - 校验读/写游标相互独立、随访问自动推进，EOF 谓词在恰好越过末尾时翻转；
//! - 流式写入绝不增长底层缓冲：构造时长度是硬上限；
//! - 越界失败携带方向化的游标信息（`read_index`/`write_index`），且游标不动。

use flint_buffer::{AccessKind, BufferError, StreamBuffer};

/// 固定场景：长度 10、预填充 0 的流缓冲，顺序写 1..=10 到写尾，
/// 再顺序读到读尾，两个方向的和一致。
#[test]
fn sequential_write_then_read_preserves_the_sum() {
    let mut stream = StreamBuffer::filled(10, 0).expect("构造应成功");
    let mut written_sum = 0u32;
    let mut next = 1u8;
    while !stream.write_eof() {
        written_sum += u32::from(next);
        stream.write_u8(next).expect("容量内顺序写");
        next += 1;
    }
    assert_eq!(stream.write_pos(), 10);

    let mut read_sum = 0u32;
    while !stream.read_eof() {
        read_sum += u32::from(stream.read_u8().expect("容量内顺序读"));
    }
    assert_eq!(read_sum, written_sum);
    assert_eq!(stream.read_pos(), 10);
}

/// EOF 时序：写满 N 字节后 `write_eof` 恰好翻转，读同理。
#[test]
fn eof_flips_exactly_after_the_last_element() {
    let mut stream = StreamBuffer::filled(4, 0).expect("构造应成功");
    stream.write_be::<u16>(1).expect("第一次写");
    assert!(!stream.write_eof(), "写到一半不应到尾");
    stream.write_be::<u16>(2).expect("第二次写");
    assert!(stream.write_eof(), "恰好写满后应到尾");

    stream.read_be::<u16>().expect("第一次读");
    assert!(!stream.read_eof());
    stream.read_be::<u16>().expect("第二次读");
    assert!(stream.read_eof());
}

/// 读写游标相互独立：写入进度不影响读取进度，反之亦然。
#[test]
fn read_and_write_cursors_advance_independently() {
    let mut stream = StreamBuffer::filled(8, 0).expect("构造应成功");
    stream.write_le::<u32>(0xaabb_ccdd).expect("写入前半段");
    assert_eq!(stream.write_pos(), 4);
    assert_eq!(stream.read_pos(), 0, "写入不推进读游标");

    assert_eq!(stream.read_le::<u32>().expect("读回前半段"), 0xaabb_ccdd);
    assert_eq!(stream.read_pos(), 4);
    assert_eq!(stream.write_pos(), 4, "读取不推进写游标");
}

/// 混合标量序列按写入顺序与端序读回。
#[test]
fn mixed_scalar_sequence_round_trips_in_order() {
    let mut stream = StreamBuffer::filled(2 + 4 + 1 + 8, 0).expect("构造应成功");
    stream.write_be::<u16>(0xffee).expect("大端 u16");
    stream.write_le::<u32>(0x0102_0304).expect("小端 u32");
    stream.write_i8(-7).expect("单字节");
    stream.write::<f64>(1.5).expect("本机序 f64");
    assert!(stream.write_eof());

    assert_eq!(stream.read_be::<u16>().expect("大端读"), 0xffee);
    assert_eq!(stream.read_le::<u32>().expect("小端读"), 0x0102_0304);
    assert_eq!(stream.read_i8().expect("单字节读"), -7);
    assert_eq!(stream.read::<f64>().expect("本机序读"), 1.5);
    assert!(stream.read_eof());
}

/// 借用构造：零拷贝顺序解码外部区间；容量内写入原地生效。
#[test]
fn borrowed_stream_decodes_and_writes_external_memory_in_place() {
    let mut external = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let expected: u32 = external.iter().map(|&b| u32::from(b)).sum();
    {
        let mut stream = StreamBuffer::borrowed(&mut external);
        let mut sum = 0u32;
        while !stream.read_eof() {
            sum += u32::from(stream.read_u8().expect("零拷贝顺序读"));
        }
        assert_eq!(sum, expected);

        stream.write_be::<u16>(0xffee).expect("容量内顺序写");
        assert!(stream.buffer().is_borrowed(), "容量内写入不触发提升");
    }
    assert_eq!(external[..2], [0xff, 0xee], "写入直接作用于外部区间");
}

/// 越界读取：错误携带读游标上下文，且游标保持原位。
#[test]
fn over_reading_reports_the_read_cursor_and_keeps_it() {
    let mut stream = StreamBuffer::from_slice(&[1, 2, 3]).expect("构造应成功");
    stream.read_u8().expect("消耗一个字节");
    let err = stream.read_be::<u32>().expect_err("剩余字节不足必须失败");
    match err {
        BufferError::OutOfRange {
            access,
            len,
            position,
            requested,
            ..
        } => {
            assert_eq!(access, AccessKind::ReadCursor);
            assert_eq!(len, 3);
            assert_eq!(position, 1);
            assert_eq!(requested, 4);
        }
        other => panic!("期望 OutOfRange，实际为 {other:?}"),
    }
    assert_eq!(stream.read_pos(), 1, "失败不推进游标");
    assert_eq!(stream.read_u8().expect("后续读取不受影响"), 2);
}

/// 流式写入绝不增长：写满之后的任何写入失败，底层长度不变。
#[test]
fn stream_writes_never_grow_the_underlying_buffer() {
    let mut stream = StreamBuffer::filled(2, 0).expect("构造应成功");
    stream.write_bytes(&[9, 8]).expect("恰好写满");
    let err = stream.write_u8(7).expect_err("写满后的写入必须失败");
    match err {
        BufferError::OutOfRange { access, .. } => {
            assert_eq!(access, AccessKind::WriteCursor);
        }
        other => panic!("期望 OutOfRange，实际为 {other:?}"),
    }
    assert_eq!(stream.buffer().len(), 2, "构造时长度是硬上限");
    assert_eq!(stream.write_pos(), 2);

    let err = stream.write_bytes(&[1, 2, 3]).expect_err("批量越界写必须失败");
    assert!(err.is_out_of_range());
    assert_eq!(stream.buffer().as_slice(), &[9, 8], "失败不产生部分写入");
}

/// 经由 `buffer_mut` 的定址访问不影响游标；`into_inner` 取回底层缓冲。
#[test]
fn addressed_access_bypasses_cursors() {
    let mut stream = StreamBuffer::filled(4, 0).expect("构造应成功");
    stream.buffer_mut().write_be::<u16>(2, 0xbeef).expect("定址写入");
    assert_eq!(stream.read_pos(), 0);
    assert_eq!(stream.write_pos(), 0);

    let buffer = stream.into_inner();
    assert_eq!(buffer.read_be::<u16>(2).expect("定址读取"), 0xbeef);
}

/// 空流缓冲：任何方向都立即到尾。
#[test]
fn empty_stream_is_immediately_at_both_ends() {
    let mut stream = StreamBuffer::new();
    assert!(stream.is_empty());
    assert!(stream.read_eof());
    assert!(stream.write_eof());
    assert!(stream.read_u8().is_err());
    assert!(stream.write_u8(1).is_err());
}
