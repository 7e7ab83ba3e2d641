//! Slice kernels for multiplying magnitudes: quadratic schoolbook and
//! Karatsuba, optionally forking the three half-size products onto a
//! [`WorkerPool`].
//!
//! All kernels take little-endian limb slices that may carry leading zero
//! limbs, and write a product of exactly `x.len() + y.len()` limbs.

use crate::pool::WorkerPool;
use tracing::trace;

/// When and where Karatsuba may fork: the pool, the minimum length of the
/// shorter operand and the number of levels left that may fork.
#[derive(Clone, Copy)]
pub(crate) struct Fork<'a> {
    pub pool: &'a WorkerPool,
    pub min_len: usize,
    pub depth: u32,
}

impl<'a> Fork<'a> {
    fn below(self) -> Option<Fork<'a>> {
        (self.depth > 1).then_some(Fork { depth: self.depth - 1, ..self })
    }
}

#[cfg(test)]
thread_local! {
    /// When set, the next forking level started from this thread panics in
    /// its middle-product task.
    pub(crate) static PANIC_IN_FORK: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

#[cfg(test)]
fn take_fork_panic() -> bool {
    PANIC_IN_FORK.with(|f| f.replace(false))
}

#[cfg(not(test))]
#[inline(always)]
fn take_fork_panic() -> bool {
    false
}

/// `z = x * y`, looping over the shorter operand in the outer loop.
pub(crate) fn schoolbook(z: &mut [u32], x: &[u32], y: &[u32]) {
    let (x, y) = if x.len() < y.len() { (y, x) } else { (x, y) };
    z.fill(0);
    for (j, &yj) in y.iter().enumerate() {
        if yj == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (i, &xi) in x.iter().enumerate() {
            let t = xi as u64 * yj as u64 + z[i + j] as u64 + carry;
            z[i + j] = t as u32;
            carry = t >> 32;
        }
        z[j + x.len()] = carry as u32;
    }
}

/// `z[..xlen + y.len()] = z[..xlen] * y` without a second buffer.
///
/// Limbs of `x` are consumed from the top down, so every partial product
/// lands on limbs that no longer hold unread input.
pub(crate) fn schoolbook_in_place(z: &mut [u32], xlen: usize, y: &[u32]) {
    z[xlen..xlen + y.len()].fill(0);
    for i in (0..xlen).rev() {
        let xi = z[i];
        z[i] = 0;
        if xi == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &yj) in y.iter().enumerate() {
            let t = xi as u64 * yj as u64 + z[i + j] as u64 + carry;
            z[i + j] = t as u32;
            carry = t >> 32;
        }
        let mut k = i + y.len();
        while carry != 0 {
            let t = z[k] as u64 + carry;
            z[k] = t as u32;
            carry = t >> 32;
            k += 1;
        }
    }
}

/// `z += a`, carrying into the limbs of `z` above `a`. The sum must fit.
fn add_into(z: &mut [u32], a: &[u32]) {
    let mut carry = 0u64;
    for (zi, &ai) in z.iter_mut().zip(a) {
        let t = *zi as u64 + ai as u64 + carry;
        *zi = t as u32;
        carry = t >> 32;
    }
    for zi in &mut z[a.len()..] {
        if carry == 0 {
            break;
        }
        let t = *zi as u64 + carry;
        *zi = t as u32;
        carry = t >> 32;
    }
    debug_assert_eq!(carry, 0);
}

/// Adds a signed carry into `z`, rippling upward. Whatever is left at the
/// top falls off the end.
fn propagate(z: &mut [u32], mut carry: i64) {
    for zi in z {
        if carry == 0 {
            break;
        }
        let t = *zi as i64 + carry;
        *zi = t as u32;
        carry = t >> 32;
    }
}

/// `z += (p - z0 - z2) * B^b`, where `z0 = z[..2b]` and `z2 = z[2b..]` hold
/// the outer products.
///
/// `z` is walked as four regions `L0 H0 L2 H2` of `b` limbs each (`H2` may
/// be short), with one carry chain landing on `H0` and another on `L2`.
/// Both chains read `H0` and `L2` before either is overwritten, so the
/// middle term is folded in with a single pass over `p`.
fn add_middle(z: &mut [u32], p: &[u32], b: usize) {
    debug_assert!(p.len() >= 2 * b && b + p.len() <= z.len());
    let (mut lo, mut hi) = (0i64, 0i64);
    for i in 0..b {
        let (l0, h0, l2) = (z[i] as i64, z[b + i] as i64, z[2 * b + i] as i64);
        let h2 = z.get(3 * b + i).map_or(0, |&l| l as i64);

        let t = h0 + p[i] as i64 - l0 - l2 + lo;
        z[b + i] = t as u32;
        lo = t >> 32;

        let t = l2 + p[b + i] as i64 - h0 - h2 + hi;
        z[2 * b + i] = t as u32;
        hi = t >> 32;
    }
    // above H2 only z2 is left to subtract
    for i in 2 * b..p.len() {
        let z2 = z.get(2 * b + i).map_or(0, |&l| l as i64);
        let t = z[b + i] as i64 + p[i] as i64 - z2 + hi;
        z[b + i] = t as u32;
        hi = t >> 32;
    }
    propagate(&mut z[2 * b..], lo);
    propagate(&mut z[b + p.len()..], hi);
}

/// `lo + hi` in a fresh buffer one limb longer than the longer half.
fn add_halves(lo: &[u32], hi: &[u32]) -> Vec<u32> {
    let (long, short) = if lo.len() >= hi.len() { (lo, hi) } else { (hi, lo) };
    let mut sum = Vec::with_capacity(long.len() + 1);
    sum.extend_from_slice(long);
    sum.push(0);
    add_into(&mut sum, short);
    sum
}

/// `z = x * y` by Karatsuba, falling back to schoolbook once the shorter
/// operand is at most `base` limbs. With a [`Fork`], the two outer products
/// and the middle product of each level run as three pool tasks.
pub(crate) fn karatsuba(z: &mut [u32], x: &[u32], y: &[u32], base: usize, fork: Option<Fork>) {
    let (x, y) = if x.len() < y.len() { (y, x) } else { (x, y) };
    debug_assert_eq!(z.len(), x.len() + y.len());
    if y.len() <= base {
        schoolbook(z, x, y);
        return;
    }

    // Lopsided operands: multiply y by y-sized slices of x.
    if x.len() >= 2 * y.len() {
        let k = y.len();
        z.fill(0);
        let mut tmp = vec![0u32; 2 * k];
        for (c, chunk) in x.chunks(k).enumerate() {
            let t = &mut tmp[..chunk.len() + k];
            karatsuba(t, chunk, y, base, fork);
            add_into(&mut z[c * k..], t);
        }
        return;
    }

    // x = x1 * B^b + x0, y = y1 * B^b + y0; y1 is non-empty since y.len() > x.len() / 2.
    let b = x.len() / 2;
    let (x0, x1) = x.split_at(b);
    let (y0, y1) = y.split_at(b);
    let (z0, z2) = z.split_at_mut(2 * b);

    let middle = |fork: Option<Fork>| {
        let sx = add_halves(x0, x1);
        let sy = add_halves(y0, y1);
        let mut p = vec![0u32; sx.len() + sy.len()];
        karatsuba(&mut p, &sx, &sy, base, fork);
        p
    };

    let p = match fork {
        Some(f) if y.len() >= f.min_len => {
            trace!(xlen = x.len(), ylen = y.len(), depth = f.depth, "forking karatsuba level");
            let sub = f.below();
            let fail = take_fork_panic();
            let ((), (), p) = f.pool.join3(
                || karatsuba(z0, x0, y0, base, sub),
                || karatsuba(z2, x1, y1, base, sub),
                || {
                    if fail {
                        panic!("middle product task failed");
                    }
                    middle(sub)
                },
            );
            p
        }
        _ => {
            karatsuba(z0, x0, y0, base, None);
            karatsuba(z2, x1, y1, base, None);
            middle(None)
        }
    };

    let room = z.len() - b;
    debug_assert!(p[room.min(p.len())..].iter().all(|&l| l == 0));
    let plen = p.len().min(room);
    add_middle(z, &p[..plen], b);
}
