//! Buffer Pool Tests
//!
//! Behavioral tests for the slot table: best fit, eviction, reclamation,
//! growth and the diagnostics view.

use proptest::prelude::*;
use scratchpool::{BufferPool, PoolConfig};

fn create_pool(pool_size: usize) -> BufferPool {
    BufferPool::new(PoolConfig::default().with_pool_size(pool_size)).unwrap()
}

// ============================================================================
// Best fit
// ============================================================================

#[test]
fn test_best_fit_picks_tightest() {
    let pool = create_pool(5);
    pool.release(vec![0u8; 100]);
    pool.release(vec![0u8; 500]);
    pool.release(vec![0u8; 1000]);

    let buf = pool.acquire(300);
    assert_eq!(buf.len(), 500);

    let buf = pool.acquire(300);
    assert_eq!(buf.len(), 1000);

    // Only the 100 is left, and it does not fit.
    let buf = pool.acquire(300);
    assert_eq!(buf.len(), 300);
    assert_eq!(pool.inspect(), vec![Some(100), None, None, None, None]);
}

#[test]
fn test_exact_fit_is_reused() {
    let pool = create_pool(2);
    pool.release(vec![0u8; 256]);

    assert_eq!(pool.acquire(256).len(), 256);
    assert_eq!(pool.stats().snapshot().hits, 1);
}

#[test]
fn test_acquire_zero() {
    let pool = create_pool(2);
    assert!(pool.acquire(0).is_empty());

    pool.release(vec![0u8; 10]);
    assert_eq!(pool.acquire(0).len(), 10);
}

// ============================================================================
// Eviction
// ============================================================================

#[test]
fn test_eviction_displaces_current_smallest() {
    let pool = create_pool(2);
    pool.release(vec![0u8; 10]);
    pool.release(vec![0u8; 20]);
    pool.release(vec![0u8; 5]);

    assert_eq!(pool.inspect(), vec![Some(5), Some(20)]);

    pool.release(vec![0u8; 50]);
    assert_eq!(pool.inspect(), vec![Some(50), Some(20)]);

    pool.release(vec![0u8; 30]);
    assert_eq!(pool.inspect(), vec![Some(50), Some(30)]);

    assert_eq!(pool.stats().snapshot().evictions, 3);
}

// ============================================================================
// Reclamation
// ============================================================================

#[test]
fn test_dead_slot_reported_empty_and_reused() {
    let pool = create_pool(3);
    pool.release(vec![0u8; 100]);
    pool.release(vec![0u8; 200]);
    pool.release(vec![0u8; 300]);

    pool.reclaim();
    assert_eq!(pool.inspect(), vec![None, None, None]);

    pool.release(vec![0u8; 1]);
    assert_eq!(pool.inspect(), vec![Some(1), None, None]);
    assert_eq!(pool.stats().snapshot().evictions, 0);
}

#[test]
fn test_dead_slot_not_handed_out() {
    let pool = create_pool(2);
    pool.release(vec![0u8; 4096]);
    pool.reclaim();

    let buf = pool.acquire(10);
    assert_eq!(buf.len(), 10);
    assert_eq!(pool.stats().snapshot().hits, 0);
}

#[test]
fn test_byte_ceiling_reclaims_oldest() {
    let pool = BufferPool::new(
        PoolConfig::default()
            .with_pool_size(4)
            .with_max_retained_bytes(1000),
    )
    .unwrap();

    pool.release(vec![0u8; 400]);
    pool.release(vec![0u8; 400]);
    pool.release(vec![0u8; 400]);

    assert_eq!(pool.inspect(), vec![None, Some(400), Some(400), None]);
    assert!(pool.retained_bytes() <= 1000);
}

#[test]
fn test_buffer_larger_than_ceiling_is_not_kept() {
    let pool = BufferPool::new(
        PoolConfig::default()
            .with_pool_size(2)
            .with_max_retained_bytes(64),
    )
    .unwrap();

    pool.release(vec![0u8; 65]);
    assert_eq!(pool.live_count(), 0);
    assert_eq!(pool.retained_bytes(), 0);
}

// ============================================================================
// Flush
// ============================================================================

#[test]
fn test_flush_is_idempotent() {
    let pool = create_pool(4);
    for size in [8, 16, 32] {
        pool.release(vec![0u8; size]);
    }

    pool.flush();
    let once = pool.inspect();
    pool.flush();

    assert_eq!(once, vec![None; 4]);
    assert_eq!(pool.inspect(), once);
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_grow_and_copy_preserves_content() {
    let pool = create_pool(4);
    let mut buf: Vec<u8> = (0u8..10).collect();

    pool.grow_and_copy(&mut buf, 50, 2, 5);

    assert!(buf.len() >= 50);
    assert_eq!(&buf[..5], &[2, 3, 4, 5, 6]);
}

#[test]
fn test_grow_graduates_buffers() {
    let pool = create_pool(4);
    let mut buf = pool.acquire(16);

    for target in [17, 40, 100, 1000] {
        let live = buf.len();
        pool.grow_and_copy(&mut buf, target, 0, live);
    }
    pool.release(buf);

    // The largest buffer is cached alongside the ones it outgrew.
    let sizes: Vec<usize> = pool.inspect().into_iter().flatten().collect();
    assert!(sizes.contains(&1000));
    assert!(pool.acquire(900).len() >= 1000);
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn test_handed_out_buffer_not_cached() {
    let pool = create_pool(3);
    pool.release(vec![0u8; 64]);

    let buf = pool.acquire(64);
    assert_eq!(pool.live_count(), 0);
    assert_eq!(pool.retained_bytes(), 0);

    pool.release(buf);
    assert_eq!(pool.live_count(), 1);
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Acquire(usize),
    Release(usize),
    Reclaim,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..2048).prop_map(Op::Acquire),
        4 => (0usize..2048).prop_map(Op::Release),
        1 => Just(Op::Reclaim),
    ]
}

proptest! {
    #[test]
    fn prop_acquire_never_short(
        pool_size in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 1..64),
    ) {
        let pool = create_pool(pool_size);
        let mut held: Vec<Vec<u8>> = Vec::new();

        for op in ops {
            match op {
                Op::Acquire(min) => {
                    let buf = pool.acquire(min);
                    prop_assert!(buf.len() >= min);
                    held.push(buf);
                }
                Op::Release(size) => match held.pop() {
                    Some(buf) => pool.release(buf),
                    None => pool.release(vec![0u8; size]),
                },
                Op::Reclaim => {
                    pool.reclaim();
                }
            }

            prop_assert_eq!(pool.inspect().len(), pool_size);
            prop_assert!(pool.live_count() <= pool_size);
        }
    }

    #[test]
    fn prop_best_fit_is_smallest_fitting(
        sizes in prop::collection::vec(1usize..4096, 1..10),
        min in 1usize..4096,
    ) {
        let pool = create_pool(sizes.len());
        for &size in &sizes {
            pool.release(vec![0u8; size]);
        }

        let expected = sizes.iter().copied().filter(|&s| s >= min).min().unwrap_or(min);
        prop_assert_eq!(pool.acquire(min).len(), expected);
    }
}
