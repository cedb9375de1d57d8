//! Single-sample prediction must not touch the heap.
//!
//! A counting global allocator records allocations made by the current thread
//! only, so the test harness running other tests in parallel does not
//! interfere.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use rls_rs::prelude::*;

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn record() {
    let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record();
        System.alloc(layout)
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record();
        System.alloc_zeroed(layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record();
        System.realloc(ptr, layout, new_size)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn allocations() -> usize {
    ALLOCATIONS.with(|count| count.get())
}

#[test]
fn test_single_sample_predict_does_not_allocate() {
    let mut inputs = Vec::new();
    for i in 0..15 {
        for j in 0..15 {
            inputs.extend_from_slice(&[i as f64 / 14.0, j as f64 / 14.0]);
        }
    }
    let targets: Vec<f64> = inputs
        .chunks(2)
        .map(|x| (3.0 * x[0]).sin() * x[1])
        .collect();

    let mut model = Rls::new()
        .kernel_grid(&[0.0, 0.0], &[1.0, 1.0], &[4, 4], 0.5)
        .epsilon(1e-6)
        .build()
        .unwrap();
    model.train(&inputs, &targets).unwrap();

    // A batch call first, so the buffer holds more than one row
    let _ = model.predict(&inputs[..20]).unwrap();

    let mut output = [0.0];
    let before = allocations();
    for i in 0..100 {
        let t = i as f64 / 99.0;
        assert!(model.predict_into(&[t, 0.5 * t], &mut output));
    }
    let after = allocations();

    assert_eq!(after - before, 0, "single-sample prediction allocated");
    assert!(output[0].is_finite());
}
