use crate::util::error::{IndexError, InvalidIndex, OutOfBoundary};

/// Upper-bound handling for [`resolve`]: whether `extent` itself is an
/// addressable position, as it is for insertion points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Exclusive,
    Inclusive,
}

/// Maps a possibly negative `index` onto `0..extent` (or `0..=extent` for
/// [`Bound::Inclusive`]). Negative indexes count back from `extent`, so `-1`
/// is the last position and `-extent` is the first.
pub(crate) fn resolve(index: isize, extent: usize, bound: Bound) -> Result<usize, IndexError> {
    let Ok(signed_extent) = isize::try_from(extent) else {
        return Err(InvalidIndex { index }.into());
    };

    let beyond_upper = match bound {
        Bound::Exclusive => index >= signed_extent,
        Bound::Inclusive => index > signed_extent,
    };

    if beyond_upper || index < -signed_extent {
        return Err(OutOfBoundary { index, extent }.into());
    }

    Ok(if index < 0 {
        (index + signed_extent) as usize
    } else {
        index as usize
    })
}
