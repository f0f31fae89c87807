//! The sixteen marching-squares cell cases.
//!
//! A case index packs the four corner classifications as bits: top-left `8`, top-right `4`,
//! bottom-right `2`, bottom-left `1`. Each entry lists the pairs of cell edges joined by a
//! contour segment.
//!
//! Cases `k` and `15 - k` share an entry, so contouring `-f` at `-t` emits the same segments
//! as `f` at `t` provided no corner sample equals the threshold exactly. A tied corner counts
//! as below in both passes, so the two classifications stop being complementary there and the
//! contour shifts to the other side of that corner. The two saddle cases (5 and 10) are not disambiguated by sampling the
//! centre: both cut off the top-left and bottom-right corners. On coarse grids this can join
//! a saddle across the wrong diagonal; a smaller step is the remedy.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

use Edge::{Bottom, Left, Right, Top};

const SADDLE: &[(Edge, Edge)] = &[(Top, Left), (Right, Bottom)];

pub(crate) const CASES: [&[(Edge, Edge)]; 16] = [
    &[],                 // 0:  none above
    &[(Left, Bottom)],   // 1:  bottom-left
    &[(Right, Bottom)],  // 2:  bottom-right
    &[(Left, Right)],    // 3:  bottom row
    &[(Top, Right)],     // 4:  top-right
    SADDLE,              // 5:  top-right + bottom-left
    &[(Top, Bottom)],    // 6:  right column
    &[(Top, Left)],      // 7:  all but top-left
    &[(Top, Left)],      // 8:  top-left
    &[(Top, Bottom)],    // 9:  left column
    SADDLE,              // 10: top-left + bottom-right
    &[(Top, Right)],     // 11: all but top-right
    &[(Left, Right)],    // 12: top row
    &[(Right, Bottom)],  // 13: all but bottom-right
    &[(Left, Bottom)],   // 14: all but bottom-left
    &[],                 // 15: all above
];

#[inline]
pub(crate) const fn case_index(
    top_left: bool,
    top_right: bool,
    bottom_right: bool,
    bottom_left: bool,
) -> usize {
    (top_left as usize) << 3
        | (top_right as usize) << 2
        | (bottom_right as usize) << 1
        | bottom_left as usize
}
