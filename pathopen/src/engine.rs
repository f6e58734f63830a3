//! C4: the directional path-opening engine — the core of this crate.
//!
//! Grounded directly on `vert_pathopen`/`diag_pathopen` in
//! `pathopen_orig.cxx`. Per spec.md §9 "Variant dispatch", the two
//! neighbour templates share every piece of the update rule (chain-length
//! propagation, `out_alive` recomputation) through the free functions below;
//! only the neighbour sets (`up_neighbours`/`down_neighbours`) and the row
//! traversal differ, and that difference is carried as data (a `Template`
//! parameter) rather than as two copies of the sweep — the vertical
//! template's neighbour sets never produce a same-row neighbour, so the
//! single sweep implementation degenerates to the original's simpler
//! vertical-only loop automatically.

use arrayvec::ArrayVec;

use crate::raster::Raster;
use crate::row_queue::RowQueue;

/// Which of the two neighbour templates (spec.md §4.4.1) an engine run uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Template {
    /// 3-connected forward cones, no in-row moves.
    Vertical,
    /// `++` diagonal: up/down neighbours include one in-row move each.
    Diagonal,
}

#[inline]
const fn li(nk: usize, k: usize, p: usize) -> usize {
    k + nk * p
}

/// Neighbours "before" `(x, y)` along `template`'s direction of travel.
/// Also the predecessor set used by the downward sweep (spec.md §4.4.4).
fn up_neighbours(template: Template, x: usize, y: usize, nx: usize, ny: usize) -> ArrayVec<(usize, usize), 3> {
    let mut v = ArrayVec::new();
    match template {
        Template::Vertical => {
            if y > 0 {
                if x > 0 {
                    v.push((x - 1, y - 1));
                }
                v.push((x, y - 1));
                if x + 1 < nx {
                    v.push((x + 1, y - 1));
                }
            }
        }
        Template::Diagonal => {
            if y > 0 {
                if x > 0 {
                    v.push((x - 1, y - 1));
                }
                v.push((x, y - 1));
            }
            if x > 0 {
                v.push((x - 1, y));
            }
        }
    }
    v
}

/// Neighbours "after" `(x, y)`. Also the predecessor set used by the
/// upward sweep (spec.md §4.4.5, symmetric to the downward one).
fn down_neighbours(template: Template, x: usize, y: usize, nx: usize, ny: usize) -> ArrayVec<(usize, usize), 3> {
    let mut v = ArrayVec::new();
    match template {
        Template::Vertical => {
            if y + 1 < ny {
                if x > 0 {
                    v.push((x - 1, y + 1));
                }
                v.push((x, y + 1));
                if x + 1 < nx {
                    v.push((x + 1, y + 1));
                }
            }
        }
        Template::Diagonal => {
            if y + 1 < ny {
                v.push((x, y + 1));
                if x + 1 < nx {
                    v.push((x + 1, y + 1));
                }
            }
            if x + 1 < nx {
                v.push((x + 1, y));
            }
        }
    }
    v
}

fn init_up_len(template: Template, x: usize, y: usize) -> i32 {
    match template {
        Template::Vertical => i32::try_from(y).unwrap_or(i32::MAX),
        Template::Diagonal => i32::try_from(x + y).unwrap_or(i32::MAX),
    }
}

fn init_down_len(template: Template, x: usize, y: usize, nx: usize, ny: usize) -> i32 {
    match template {
        Template::Vertical => i32::try_from(ny - 1 - y).unwrap_or(i32::MAX),
        Template::Diagonal => i32::try_from((nx - 1 - x) + (ny - 1 - y)).unwrap_or(i32::MAX),
    }
}

/// All per-pixel, per-layer state planes for one directional engine run
/// (spec.md §3). Indexed `k + nk * (x + nx * y)`.
struct State {
    nx: usize,
    ny: usize,
    nk: usize,
    l: i32,
    alive: Vec<bool>,
    chain_up: Vec<i32>,
    chain_down: Vec<i32>,
    out_alive: Vec<bool>,
    alive_count: Vec<u32>,
    output: Vec<u8>,
}

impl State {
    fn new(template: Template, nx: usize, ny: usize, k_max: usize, l: u32) -> Self {
        let nk = k_max + 1;
        let num_pixels = nx * ny;
        let l_minus1 = i32::try_from(l).unwrap_or(i32::MAX) - 1;

        let mut chain_up = vec![0i32; nk * num_pixels];
        let mut chain_down = vec![0i32; nk * num_pixels];
        for y in 0..ny {
            for x in 0..nx {
                let p = x + nx * y;
                let up = init_up_len(template, x, y).min(l_minus1);
                let down = init_down_len(template, x, y, nx, ny).min(l_minus1);
                for k in 0..nk {
                    chain_up[li(nk, k, p)] = up;
                    chain_down[li(nk, k, p)] = down;
                }
            }
        }

        Self {
            nx,
            ny,
            nk,
            l: i32::try_from(l).unwrap_or(i32::MAX),
            alive: vec![true; num_pixels],
            chain_up,
            chain_down,
            out_alive: vec![true; nk * num_pixels],
            alive_count: vec![u32::try_from(nk).unwrap_or(u32::MAX); num_pixels],
            output: vec![0u8; num_pixels],
        }
    }

    /// Spec.md §4.4.3 steps 2-3: recompute every `(k, K-1-k)` pairing for a
    /// pixel that has just turned off, and finalise `output` if none survive.
    fn extinguish(&mut self, p: usize, k_max: usize, threshold: u8) {
        if self.alive_count[p] == 0 {
            return;
        }
        self.alive_count[p] = 0;
        for k in 0..k_max {
            let up = self.chain_up[li(self.nk, k, p)];
            let down = self.chain_down[li(self.nk, k_max - 1 - k, p)];
            let flag = up + down + 1 >= self.l;
            self.out_alive[li(self.nk, k, p)] = flag;
            if flag {
                self.alive_count[p] += 1;
            }
        }
        if self.alive_count[p] == 0 {
            self.output[p] = threshold;
        }
    }

    /// Spec.md §4.4.4 step b: `chain_up[k, p]` just decreased; recompute
    /// the affected `out_alive[k, p]` entry.
    fn after_chain_up_change(&mut self, k: usize, p: usize, k_max: usize, threshold: u8) {
        let up = self.chain_up[li(self.nk, k, p)];
        let new_flag = if self.alive[p] {
            debug_assert!(k <= k_max, "k must be in [0, K] while p is alive");
            let down = self.chain_down[li(self.nk, k_max - k, p)];
            up + down + 1 >= self.l
        } else {
            if k >= k_max {
                // K - 1 - k < 0: p is already off and this layer has no
                // valid (up, down) pairing left (see spec.md §9 Open Question).
                return;
            }
            let down = self.chain_down[li(self.nk, k_max - 1 - k, p)];
            up + down + 1 >= self.l
        };

        let out_i = li(self.nk, k, p);
        if self.out_alive[out_i] && !new_flag {
            self.out_alive[out_i] = false;
            debug_assert!(self.alive_count[p] > 0);
            self.alive_count[p] -= 1;
            if self.alive_count[p] == 0 {
                self.output[p] = threshold;
            }
        }
    }

    /// Spec.md §4.4.5: symmetric to [`Self::after_chain_up_change`] for a
    /// `chain_down[k, p]` decrease. The affected `out_alive` layer is the
    /// *upstream*-gap index paired with `k`, `K - k` (alive) or `K - 1 - k`
    /// (not alive) — not `k` itself.
    fn after_chain_down_change(&mut self, k: usize, p: usize, k_max: usize, threshold: u8) {
        let down = self.chain_down[li(self.nk, k, p)];
        let (out_k, new_flag) = if self.alive[p] {
            debug_assert!(k <= k_max, "k must be in [0, K] while p is alive");
            let up_layer = k_max - k;
            let up = self.chain_up[li(self.nk, up_layer, p)];
            (up_layer, up + down + 1 >= self.l)
        } else {
            if k >= k_max {
                return;
            }
            let up_layer = k_max - 1 - k;
            let up = self.chain_up[li(self.nk, up_layer, p)];
            (up_layer, up + down + 1 >= self.l)
        };

        let out_i = li(self.nk, out_k, p);
        if self.out_alive[out_i] && !new_flag {
            self.out_alive[out_i] = false;
            debug_assert!(self.alive_count[p] > 0);
            self.alive_count[p] -= 1;
            if self.alive_count[p] == 0 {
                self.output[p] = threshold;
            }
        }
    }
}

/// Batches of columns discovered while processing one row at one threshold,
/// destined for either the same row (diagonal in-row moves only) or the
/// adjacent row, one `Vec` per gap layer.
struct RowBatches {
    same_row: Vec<Vec<u32>>,
    other_row: Vec<Vec<u32>>,
}

impl RowBatches {
    fn new(nk: usize) -> Self {
        Self {
            same_row: vec![Vec::new(); nk],
            other_row: vec![Vec::new(); nk],
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn enqueue_neighbours(
    template: Template,
    direction_neighbours: &[(usize, usize)],
    x: usize,
    y: usize,
    nx: usize,
    nk: usize,
    in_queue: &mut [bool],
    batches: &mut RowBatches,
) {
    let _ = template;
    for &(qx, qy) in direction_neighbours {
        let q = qx + nx * qy;
        let same_row = qy == y;
        for k in 0..nk {
            let fi = li(nk, k, q);
            if !in_queue[fi] {
                in_queue[fi] = true;
                if same_row {
                    batches.same_row[k].push(u32::try_from(qx).expect("column fits in u32"));
                } else {
                    batches.other_row[k].push(u32::try_from(qx).expect("column fits in u32"));
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn process_pixel(
    template: Template,
    p: usize,
    x: usize,
    y: usize,
    state: &mut State,
    k_max: usize,
    threshold: u8,
    down_batches: &mut RowBatches,
    up_batches: &mut RowBatches,
    in_queue_down: &mut [bool],
    in_queue_up: &mut [bool],
) {
    if !state.alive[p] {
        return;
    }
    state.alive[p] = false;
    state.extinguish(p, k_max, threshold);

    let nk = state.nk;
    let down = down_neighbours(template, x, y, state.nx, state.ny);
    enqueue_neighbours(template, &down, x, y, state.nx, nk, in_queue_down, down_batches);
    let up = up_neighbours(template, x, y, state.nx, state.ny);
    enqueue_neighbours(template, &up, x, y, state.nx, nk, in_queue_up, up_batches);
}

fn max_prev_down(template: Template, state: &State, k: usize, x: usize, y: usize) -> i32 {
    let preds = up_neighbours(template, x, y, state.nx, state.ny);
    let mut max_prev = -1i32;
    if k > 0 {
        for &(qx, qy) in &preds {
            let q = qx + state.nx * qy;
            max_prev = max_prev.max(state.chain_up[li(state.nk, k - 1, q)]);
        }
    }
    for &(qx, qy) in &preds {
        let q = qx + state.nx * qy;
        if state.alive[q] {
            max_prev = max_prev.max(state.chain_up[li(state.nk, k, q)]);
        }
    }
    max_prev
}

fn max_prev_up(template: Template, state: &State, k: usize, x: usize, y: usize) -> i32 {
    let succs = down_neighbours(template, x, y, state.nx, state.ny);
    let mut max_prev = -1i32;
    if k > 0 {
        for &(qx, qy) in &succs {
            let q = qx + state.nx * qy;
            max_prev = max_prev.max(state.chain_down[li(state.nk, k - 1, q)]);
        }
    }
    for &(qx, qy) in &succs {
        let q = qx + state.nx * qy;
        if state.alive[q] {
            max_prev = max_prev.max(state.chain_down[li(state.nk, k, q)]);
        }
    }
    max_prev
}

/// Spec.md §4.4.4: propagate `chain_up` changes in strictly increasing row
/// order. Rows with no in-row moves (vertical) never populate `same_row`
/// batches, so the "virtual" same-row walk below never triggers for them
/// and this reduces to a plain left-to-right scan of each row's queue.
fn sweep_down(template: Template, state: &mut State, queue: &mut RowQueue, in_queue: &mut [bool], k_max: usize, threshold: u8) {
    let nk = state.nk;
    let (nx, ny) = (state.nx, state.ny);

    for k in 0..nk {
        for y in 0..ny {
            if queue.row(k, y).is_empty() {
                continue;
            }
            let row = queue.take_row(k, y);

            let mut same_k_next_row = Vec::new();
            let mut next_k_next_row = Vec::new();
            let mut next_k_same_row = Vec::new();

            let mut i = 0usize;
            let mut x = row[0] as usize;
            loop {
                let p = x + nx * y;
                in_queue[li(nk, k, p)] = false;

                let max_prev = max_prev_down(template, state, k, x, y);
                let cur_idx = li(nk, k, p);
                let mut advance_in_row = false;

                if max_prev + 1 < state.chain_up[cur_idx] {
                    state.chain_up[cur_idx] = max_prev + 1;
                    state.after_chain_up_change(k, p, k_max, threshold);

                    if y + 1 < ny {
                        for &(qx, qy) in &down_neighbours(template, x, y, nx, ny) {
                            if qy != y + 1 {
                                continue;
                            }
                            let q = qx + nx * qy;
                            if !in_queue[li(nk, k, q)] {
                                in_queue[li(nk, k, q)] = true;
                                same_k_next_row.push(u32::try_from(qx).expect("column fits in u32"));
                            }
                            if k < k_max && !in_queue[li(nk, k + 1, q)] {
                                in_queue[li(nk, k + 1, q)] = true;
                                next_k_next_row.push(u32::try_from(qx).expect("column fits in u32"));
                            }
                        }
                    }
                    if x + 1 < nx {
                        if let Template::Diagonal = template {
                            let q = (x + 1) + nx * y;
                            if !in_queue[li(nk, k, q)] {
                                in_queue[li(nk, k, q)] = true;
                                advance_in_row = true;
                            }
                            if k < k_max && !in_queue[li(nk, k + 1, q)] {
                                in_queue[li(nk, k + 1, q)] = true;
                                next_k_same_row.push(u32::try_from(x + 1).expect("column fits in u32"));
                            }
                        }
                    }
                }

                if advance_in_row {
                    x += 1;
                    if x >= nx {
                        break;
                    }
                    if i + 1 < row.len() && row[i + 1] as usize == x {
                        i += 1;
                    }
                } else {
                    if i + 1 >= row.len() {
                        break;
                    }
                    i += 1;
                    x = row[i] as usize;
                }
            }

            if !same_k_next_row.is_empty() {
                queue.merge_row(&same_k_next_row, k, y + 1);
            }
            if !next_k_next_row.is_empty() {
                queue.merge_row(&next_k_next_row, k + 1, y + 1);
            }
            if !next_k_same_row.is_empty() {
                queue.merge_row(&next_k_same_row, k + 1, y);
            }
        }
    }
}

/// Spec.md §4.4.5: propagate `chain_down` changes in strictly decreasing
/// row order; symmetric to [`sweep_down`], walking each row right-to-left.
fn sweep_up(template: Template, state: &mut State, queue: &mut RowQueue, in_queue: &mut [bool], k_max: usize, threshold: u8) {
    let nk = state.nk;
    let (nx, ny) = (state.nx, state.ny);

    for k in 0..nk {
        for y in (0..ny).rev() {
            if queue.row(k, y).is_empty() {
                continue;
            }
            let row = queue.take_row(k, y);

            let mut same_k_prev_row = Vec::new();
            let mut next_k_prev_row = Vec::new();
            let mut next_k_same_row = Vec::new();

            let mut i = row.len() - 1;
            let mut x = row[i] as usize;
            loop {
                let p = x + nx * y;
                in_queue[li(nk, k, p)] = false;

                let max_prev = max_prev_up(template, state, k, x, y);
                let cur_idx = li(nk, k, p);
                let mut advance_in_row = false;

                if max_prev + 1 < state.chain_down[cur_idx] {
                    state.chain_down[cur_idx] = max_prev + 1;
                    state.after_chain_down_change(k, p, k_max, threshold);

                    if y >= 1 {
                        for &(qx, qy) in &up_neighbours(template, x, y, nx, ny) {
                            if qy + 1 != y {
                                continue;
                            }
                            let q = qx + nx * qy;
                            if !in_queue[li(nk, k, q)] {
                                in_queue[li(nk, k, q)] = true;
                                same_k_prev_row.push(u32::try_from(qx).expect("column fits in u32"));
                            }
                            if k < k_max && !in_queue[li(nk, k + 1, q)] {
                                in_queue[li(nk, k + 1, q)] = true;
                                next_k_prev_row.push(u32::try_from(qx).expect("column fits in u32"));
                            }
                        }
                    }
                    if x >= 1 {
                        if let Template::Diagonal = template {
                            let q = (x - 1) + nx * y;
                            if !in_queue[li(nk, k, q)] {
                                in_queue[li(nk, k, q)] = true;
                                advance_in_row = true;
                            }
                            if k < k_max && !in_queue[li(nk, k + 1, q)] {
                                in_queue[li(nk, k + 1, q)] = true;
                                next_k_same_row.push(u32::try_from(x - 1).expect("column fits in u32"));
                            }
                        }
                    }
                }

                if advance_in_row {
                    if x == 0 {
                        break;
                    }
                    x -= 1;
                    if i > 0 && row[i - 1] as usize == x {
                        i -= 1;
                    }
                } else {
                    if i == 0 {
                        break;
                    }
                    i -= 1;
                    x = row[i] as usize;
                }
            }

            same_k_prev_row.reverse();
            next_k_prev_row.reverse();
            next_k_same_row.reverse();

            if y >= 1 {
                if !same_k_prev_row.is_empty() {
                    queue.merge_row(&same_k_prev_row, k, y - 1);
                }
                if !next_k_prev_row.is_empty() {
                    queue.merge_row(&next_k_prev_row, k + 1, y - 1);
                }
            }
            if !next_k_same_row.is_empty() {
                queue.merge_row(&next_k_same_row, k + 1, y);
            }
        }
    }
}

/// Run one directional engine over `raster`, whose pixels are visited in
/// `indices` order (spec.md §4.4.3-§4.4.5). `l` and `k_max` must already be
/// validated by the caller (`l >= 1`).
pub(crate) fn run(template: Template, raster: &Raster, indices: &[u32], l: u32, k_max: usize) -> Vec<u8> {
    let nx = raster.nx();
    let ny = raster.ny();
    let nk = k_max + 1;

    let mut state = State::new(template, nx, ny, k_max, l);
    let mut queue_down = RowQueue::new(nk, ny);
    let mut queue_up = RowQueue::new(nk, ny);
    let mut in_queue_down = vec![false; nk * nx * ny];
    let mut in_queue_up = vec![false; nk * nx * ny];

    let pixels = raster.as_slice();
    let n = indices.len();
    let mut i = 0usize;

    while i < n {
        let threshold = pixels[indices[i] as usize];

        while i < n && pixels[indices[i] as usize] == threshold {
            let row_y = (indices[i] as usize) / nx;

            let mut down_batches = RowBatches::new(nk);
            let mut up_batches = RowBatches::new(nk);

            while i < n && pixels[indices[i] as usize] == threshold && (indices[i] as usize) / nx == row_y {
                let p = indices[i] as usize;
                let (x, y) = (p % nx, p / nx);
                process_pixel(
                    template,
                    p,
                    x,
                    y,
                    &mut state,
                    k_max,
                    threshold,
                    &mut down_batches,
                    &mut up_batches,
                    &mut in_queue_down,
                    &mut in_queue_up,
                );
                i += 1;
            }

            for k in 0..nk {
                if !down_batches.same_row[k].is_empty() {
                    queue_down.merge_row(&down_batches.same_row[k], k, row_y);
                }
            }
            if row_y + 1 < ny {
                for k in 0..nk {
                    if !down_batches.other_row[k].is_empty() {
                        queue_down.merge_row(&down_batches.other_row[k], k, row_y + 1);
                    }
                }
            }
            for k in 0..nk {
                if !up_batches.same_row[k].is_empty() {
                    queue_up.merge_row(&up_batches.same_row[k], k, row_y);
                }
            }
            if row_y >= 1 {
                for k in 0..nk {
                    if !up_batches.other_row[k].is_empty() {
                        queue_up.merge_row(&up_batches.other_row[k], k, row_y - 1);
                    }
                }
            }
        }

        sweep_down(template, &mut state, &mut queue_down, &mut in_queue_down, k_max, threshold);
        sweep_up(template, &mut state, &mut queue_up, &mut in_queue_up, k_max, threshold);
    }

    state.output
}

/// Run the vertical path opening (3-connected forward cones).
#[must_use]
pub fn vertical_path_open(raster: &Raster, indices: &[u32], l: u32, k_max: usize) -> Vec<u8> {
    run(Template::Vertical, raster, indices, l, k_max)
}

/// Run the `++` diagonal path opening.
#[must_use]
pub fn diagonal_path_open(raster: &Raster, indices: &[u32], l: u32, k_max: usize) -> Vec<u8> {
    run(Template::Diagonal, raster, indices, l, k_max)
}

/// Combine all four fixed orientations (vertical, horizontal via transpose,
/// `++` diagonal, and its vertical flip) by per-pixel maximum (spec.md §4.5).
pub(crate) fn combined(raster: &Raster, l: u32, k_max: usize) -> Vec<u8> {
    use crate::orientation::{flip_indices, flip_y, transpose, transpose_indices};
    use crate::radix_sort::sorted_indices;

    let (nx, ny) = (raster.nx(), raster.ny());
    let indices = sorted_indices(raster);

    let vertical = vertical_path_open(raster, &indices, l, k_max);

    let transposed = transpose(raster);
    let transposed_indices = transpose_indices(&indices, nx, ny);
    let horizontal_t = vertical_path_open(&transposed, &transposed_indices, l, k_max);
    let horizontal_raster = Raster::new(transposed.nx(), transposed.ny(), horizontal_t)
        .expect("transposed dimensions are non-zero by construction");
    let horizontal = transpose(&horizontal_raster).into_vec();

    let diag_a = diagonal_path_open(raster, &indices, l, k_max);

    let flipped = flip_y(raster);
    let flipped_indices = flip_indices(&indices, nx, ny);
    let diag_b_flipped = diagonal_path_open(&flipped, &flipped_indices, l, k_max);
    let diag_b_raster =
        Raster::new(nx, ny, diag_b_flipped).expect("flipped dimensions are unchanged and non-zero");
    let diag_b = flip_y(&diag_b_raster).into_vec();

    let mut out = vec![0u8; raster.len()];
    for i in 0..out.len() {
        out[i] = vertical[i].max(horizontal[i]).max(diag_a[i]).max(diag_b[i]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radix_sort::sorted_indices;

    fn run_vertical(input: &[u8], ny: usize, l: u32, k: usize) -> Vec<u8> {
        let raster = Raster::new(1, ny, input.to_vec()).unwrap();
        let indices = sorted_indices(&raster);
        vertical_path_open(&raster, &indices, l, k)
    }

    // S1
    #[test]
    fn single_pixel_length_one() {
        assert_eq!(run_vertical(&[5], 1, 1, 0), vec![5]);
    }

    // S2
    #[test]
    fn three_equal_pixels_length_three() {
        assert_eq!(run_vertical(&[5, 5, 5], 3, 3, 0), vec![5, 5, 5]);
    }

    // S3
    #[test]
    fn dip_drags_whole_path_down() {
        assert_eq!(run_vertical(&[5, 5, 3], 3, 3, 0), vec![3, 3, 3]);
    }

    // S4
    #[test]
    fn gap_budget_absorbs_middle() {
        assert_eq!(run_vertical(&[5, 0, 5], 3, 3, 1), vec![5, 0, 5]);
    }

    // S5
    #[test]
    fn no_gap_budget_clears_path() {
        assert_eq!(run_vertical(&[5, 0, 5], 3, 3, 0), vec![0, 0, 0]);
    }

    #[test]
    fn length_one_is_identity() {
        let raster = Raster::new(4, 4, vec![1, 7, 3, 9, 2, 8, 0, 6, 5, 4, 3, 2, 1, 0, 9, 8]).unwrap();
        let indices = sorted_indices(&raster);
        let out = vertical_path_open(&raster, &indices, 1, 0);
        assert_eq!(out, raster.as_slice());
    }

    #[test]
    fn diagonal_on_single_row_is_horizontal_like() {
        // Single row: the diagonal template's in-row moves make it behave
        // like a horizontal opening along y = 0.
        let raster = Raster::new(3, 1, vec![5, 5, 3]).unwrap();
        let indices = sorted_indices(&raster);
        let out = diagonal_path_open(&raster, &indices, 3, 0);
        assert_eq!(out, vec![3, 3, 3]);
    }

    #[test]
    fn anti_extensivity() {
        let raster = Raster::new(5, 5, vec![
            10, 200, 30, 40, 250,
            5, 6, 7, 8, 9,
            100, 2, 3, 4, 150,
            9, 8, 7, 6, 5,
            1, 2, 250, 4, 5,
        ]).unwrap();
        let indices = sorted_indices(&raster);
        for &(l, k) in &[(2u32, 0usize), (3, 1), (4, 2)] {
            let out = vertical_path_open(&raster, &indices, l, k);
            for (o, i) in out.iter().zip(raster.as_slice()) {
                assert!(o <= i);
            }
            let out = diagonal_path_open(&raster, &indices, l, k);
            for (o, i) in out.iter().zip(raster.as_slice()) {
                assert!(o <= i);
            }
        }
    }

    #[test]
    fn combined_is_at_least_each_orientation() {
        let raster = Raster::new(4, 3, vec![9, 1, 1, 9, 1, 9, 9, 1, 9, 1, 1, 9]).unwrap();
        let indices = sorted_indices(&raster);
        let vertical = vertical_path_open(&raster, &indices, 3, 0);
        let out = combined(&raster, 3, 0);
        for i in 0..out.len() {
            assert!(out[i] >= vertical[i]);
            assert!(out[i] <= raster.as_slice()[i]);
        }
    }

    #[test]
    fn combined_idempotent_on_flat_image() {
        let raster = Raster::new(3, 3, vec![7; 9]).unwrap();
        let out = combined(&raster, 2, 1);
        assert_eq!(out, vec![7; 9]);
    }
}
