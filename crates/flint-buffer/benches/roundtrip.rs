use criterion::{Criterion, black_box};
use flint_buffer::{ByteBuffer, StreamBuffer};
use std::{env, time::Duration};

/// 基准一：定址缓冲的"追加 -> 读回"往返成本。
///
/// # 设计背景（Why）
/// - 追加是唯一的增长入口，其倍增策略直接决定批量编码的摊还成本；
///   本基准通过 1 KiB 的追加-读回循环快速检测增长路径回归。
///
/// # 逻辑解析（How）
/// - 每轮迭代：从空缓冲连续追加 128 个大端 `u64`（触发多次倍增），
///   再逐个定址读回并求和，结果经 `black_box` 防止被优化掉。
fn bench_buffer_roundtrip(c: &mut Criterion) {
    c.bench_function("buffer_append_read_roundtrip", |b| {
        b.iter(|| {
            let mut buf = ByteBuffer::new();
            for i in 0..128u64 {
                buf.append_be::<u64>(i).unwrap();
            }
            let mut sum = 0u64;
            for i in 0..128usize {
                sum = sum.wrapping_add(buf.read_be::<u64>(i * 8).unwrap());
            }
            black_box(sum)
        });
    });
}

/// 基准二：流式游标的顺序"写满 -> 读空"成本。
///
/// # 设计背景（Why）
/// - 游标层在每次访问上叠加一次边界检查与游标推进；
///   本基准衡量该层相对裸定址访问的额外开销是否保持在噪声量级。
fn bench_stream_roundtrip(c: &mut Criterion) {
    c.bench_function("stream_write_read_roundtrip", |b| {
        b.iter(|| {
            let mut stream = StreamBuffer::filled(1024, 0).unwrap();
            while !stream.write_eof() {
                stream.write_le::<u32>(0xdead_beef).unwrap();
            }
            let mut sum = 0u32;
            while !stream.read_eof() {
                sum = sum.wrapping_add(stream.read_le::<u32>().unwrap());
            }
            black_box(sum)
        });
    });
}

fn main() {
    let mut quick_mode = false;
    for arg in env::args().skip(1) {
        if arg == "--quick" {
            quick_mode = true;
        }
    }

    let mut criterion = Criterion::default();
    if quick_mode {
        criterion = criterion
            .sample_size(10)
            .warm_up_time(Duration::from_millis(100))
            .measurement_time(Duration::from_millis(250));
    }

    bench_buffer_roundtrip(&mut criterion);
    bench_stream_roundtrip(&mut criterion);
    criterion.final_summary();
}
