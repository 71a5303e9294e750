#![cfg(test)]

use std::iter;

use super::*;
use crate::collections::kind::ContainerKind;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

/// Reads every slot through both address forms and asserts they agree.
macro_rules! assert_mirrored {
    ($buf:expr) => {
        let cap = $buf.cap() as isize;
        for i in 0..cap {
            assert_eq!(
                $buf.get(i),
                $buf.get(i - cap),
                "Every slot should read identically at its negative address."
            );
        }
    };
}

#[test]
fn test_append_occupies_in_order() {
    let mut buf = StaticBuffer::new(4);
    buf.append(10);
    buf.append(20);
    buf.append(30);

    assert_eq!(buf.len(), 3, "Three appends should occupy three slots.");
    assert_eq!(buf.cap(), 4, "Appending should never change the capacity.");
    assert_eq!(
        buf.slots(),
        [Some(10), Some(20), Some(30), None],
        "Appends should fill slots from the front."
    );
    assert_mirrored!(buf);
}

#[test]
fn test_append_fails_at_watermark_not_occupancy() {
    let mut buf = StaticBuffer::from([1, 2, 3]);
    assert!(
        buf.try_append(4).is_err(),
        "Appending to a full buffer should fail."
    );

    assert_eq!(buf.remove(1), Some(2), "Removing should return the occupant.");
    assert_eq!(buf.len(), 2, "Removing should lower the length.");
    assert_eq!(
        buf.core.watermark, 3,
        "Removing should not lower the watermark."
    );
    assert!(
        buf.try_append(4).is_err(),
        "The hole behind the watermark should not re-enable appending."
    );

    assert_eq!(
        buf.try_append(9),
        Err(CapacityExceeded { capacity: 3 }),
        "The error should carry the capacity."
    );
    assert_panics!({
        StaticBuffer::from([1, 2]).append(3);
    });
}

#[test]
fn test_insert_sequence_of_operations() {
    let mut buf = StaticBuffer::new(7);
    buf.append(7);
    buf.insert(3, 6);
    buf.insert(5, 2);
    buf.insert(3, 16);
    let old = buf.replace(4, 26);

    assert_eq!(old, Some(6), "Replacing should return the shifted occupant.");
    assert_eq!(buf.len(), 4, "Replacing an occupied slot should not change the length.");
    assert_eq!(buf.get(3), Some(&16), "The inserted value should sit at its index.");
    assert_eq!(buf.get(4), Some(&26), "The replacement should sit at its index.");
    assert_eq!(buf.get(5), Some(&2), "Untouched occupants should stay put.");
    assert_eq!(
        buf.get(-4),
        Some(&16),
        "The negative address should reach the same slot."
    );
    assert_mirrored!(buf);
}

#[test]
fn test_insert_into_empty_slot_raises_watermark() {
    let mut buf = StaticBuffer::new(5);
    buf.append(1);
    buf.insert(3, 9);

    assert_eq!(
        buf.slots(),
        [Some(1), None, None, Some(9), None],
        "Inserting into an empty slot should not move anything."
    );
    assert_eq!(
        buf.core.watermark, 4,
        "Inserting beyond the watermark should raise it past the slot."
    );

    buf.append(5);
    assert_eq!(
        buf.get(4),
        Some(&5),
        "The next append should land past the inserted slot, not in the holes."
    );
}

#[test]
fn test_insert_then_remove_restores_size() {
    let mut buf = StaticBuffer::new(5);
    buf.append(1);
    buf.append(2);
    let before = buf.len();

    buf.insert(3, 9);
    assert_eq!(buf.remove(3), Some(9), "Removal should return the inserted value.");
    assert_eq!(buf.len(), before, "The length should return to what it was.");
    assert_eq!(
        buf.slots(),
        [Some(1), Some(2), None, None, None],
        "Neighbors should sit exactly where they started."
    );
}

#[test]
fn test_insert_shifts_toward_right_gap() {
    let mut buf = StaticBuffer::new(5);
    buf.append(1);
    buf.append(2);
    buf.append(3);

    buf.insert(1, 9);
    assert_eq!(
        buf.slots(),
        [Some(1), Some(9), Some(2), Some(3), None],
        "Occupants from the index should shift right into the nearest gap."
    );
    assert_eq!(buf.core.watermark, 4, "The shift should carry the watermark along.");
    assert_mirrored!(buf);
}

#[test]
fn test_insert_shifts_left_when_right_is_full() {
    let mut buf = StaticBuffer::new(5);
    for value in [1, 2, 3, 4] {
        buf.insert(1 + buf.len() as isize, value);
    }
    assert_eq!(
        buf.slots(),
        [None, Some(1), Some(2), Some(3), Some(4)],
        "Setup should leave the gap at slot 0."
    );

    buf.insert(2, 9);
    assert_eq!(
        buf.slots(),
        [Some(1), Some(2), Some(9), Some(3), Some(4)],
        "With no gap on the right, occupants should shift left instead."
    );
    assert_mirrored!(buf);
}

#[test]
fn test_insert_full_buffer_fails() {
    let mut buf = StaticBuffer::from([1, 2, 3]);

    let err = buf.try_insert(1, 9).unwrap_err();
    assert!(
        err.is_capacity_exceeded(),
        "Inserting with no empty slot anywhere should report exceeded capacity."
    );
    assert_panics!({
        StaticBuffer::from([1, 2, 3]).insert(0, 9);
    });
}

#[test]
fn test_insert_bounds() {
    let mut buf = StaticBuffer::new(3);

    assert_eq!(
        buf.try_insert(3, 9),
        Err(InsertError::OutOfBoundary(OutOfBoundary { index: 3, extent: 3 })),
        "The capacity itself should not be insertable."
    );
    assert_eq!(
        buf.try_insert(-4, 9),
        Err(InsertError::OutOfBoundary(OutOfBoundary { index: -4, extent: 3 })),
        "Indexes below the negative capacity should be rejected."
    );
    assert!(
        buf.try_insert(-3, 7).is_ok(),
        "The negative capacity itself should name slot 0."
    );
    assert_eq!(buf.get(0), Some(&7), "-capacity should resolve to the first slot.");
}

#[test]
fn test_remove_leaves_hole() {
    let mut buf = StaticBuffer::from([1, 2, 3, 4]);

    assert_eq!(buf.remove(-3), Some(2), "Negative removal should reach slot 1.");
    assert_eq!(
        buf.slots(),
        [Some(1), None, Some(3), Some(4)],
        "Neighbors should not move in after a removal."
    );
    assert_eq!(buf.remove(1), None, "Removing an empty slot should return nothing.");
    assert_eq!(buf.len(), 3, "Removing an empty slot should not change the length.");
    assert_mirrored!(buf);
}

#[test]
fn test_replace_occupies_empty_slot() {
    let mut buf = StaticBuffer::new(4);
    buf.append(1);

    assert_eq!(
        buf.try_replace(2, 9),
        Ok(None),
        "Replacing an empty slot should return no previous occupant."
    );
    assert_eq!(buf.len(), 2, "Replacing an empty slot should raise the length.");
    assert_eq!(
        buf.core.watermark, 3,
        "Replacing an empty slot should raise the watermark over it."
    );
    assert_eq!(
        buf.replace(2, 10),
        Some(9),
        "Replacing an occupied slot should return the old occupant."
    );
    assert_eq!(buf.len(), 2, "Replacing an occupied slot should keep the length.");
}

#[test]
fn test_get_and_bounds() {
    let buf = StaticBuffer::from([1, 2, 3]);

    assert_eq!(buf.get(-1), Some(&3), "-1 should name the last slot.");
    assert_eq!(buf[1], Some(2), "The index operator should read the slot.");
    assert_eq!(buf[-3], Some(1), "The index operator should accept negative indexes.");

    assert_eq!(
        buf.try_get(3),
        Err(IndexError::OutOfBoundary(OutOfBoundary { index: 3, extent: 3 })),
        "Reads at the capacity should be rejected."
    );
    assert_panics!({
        let buf = StaticBuffer::from([1, 2, 3]);
        buf.get(-4);
    });

    let mut buf = buf;
    if let Some(value) = buf.get_mut(0) {
        *value = 11;
    }
    assert_eq!(buf.get(0), Some(&11), "Mutable access should write through.");
}

#[test]
fn test_search_skips_holes() {
    let mut buf = StaticBuffer::from([5, 6, 7, 6]);
    buf.remove(1);

    assert_eq!(buf.index_of(&6), Some(3), "Search should skip holes and keep positions.");
    assert_eq!(buf.index_of(&8), None, "Absent values should not be found.");
    assert!(buf.contains(&7), "contains should see remaining occupants.");
    assert!(buf.contains(&6), "The duplicate past the hole should still be found.");

    assert_eq!(
        buf.index_of_by(&0, |stored, _| stored % 2 == 1),
        Some(0),
        "Injected comparisons should drive the search."
    );
    assert_eq!(
        buf.remove_item(&7),
        Some(7),
        "Removing by value should return the occupant."
    );
    assert_eq!(buf.get(2), None, "Removing by value should empty the found slot.");
    assert_eq!(buf.len(), 2, "Removing by value should lower the length.");
    assert_eq!(buf.remove_item(&7), None, "A second removal should find nothing.");
}

#[test]
fn test_map_preserves_holes_and_positions() {
    let mut buf = StaticBuffer::from([1, 2, 3, 4]);
    buf.remove(2);

    let mapped = buf.map(|_, slot| slot.map(|v| v * 10));
    assert_eq!(
        mapped.slots(),
        [Some(10), Some(20), None, Some(40)],
        "Mapping should transform occupants in place and keep holes."
    );
    assert_eq!(mapped.len(), 3, "The result should count its own occupants.");
    assert_eq!(mapped.cap(), 4, "Mapping should preserve the capacity.");
    assert_eq!(
        mapped.core.watermark, 4,
        "The result's watermark should cover its highest occupant."
    );

    let flags = buf.map(|idx, slot| Some(idx % 2 == 0 && slot.is_some()));
    assert_eq!(
        flags.slots(),
        [Some(true), Some(false), Some(false), Some(false)],
        "The mapping is free to occupy slots the source left empty."
    );
    assert_eq!(flags.len(), 4, "Occupancy of the result follows what was produced.");
}

#[test]
fn test_clear_resets_watermark() {
    let mut buf = StaticBuffer::from([1, 2, 3]);
    buf.clear();

    assert!(buf.is_empty(), "Clearing should empty every slot.");
    assert_eq!(buf.cap(), 3, "Clearing should keep the capacity.");

    buf.append(9);
    assert_eq!(
        buf.get(0),
        Some(&9),
        "Appending after a clear should start from slot 0 again."
    );
}

#[test]
fn test_clone_and_eq() {
    let mut buf = StaticBuffer::from([1, 2, 3]);
    buf.remove(1);

    let clone = buf.clone();
    assert_eq!(clone, buf, "A clone should compare equal slot for slot.");

    let mut other = StaticBuffer::new(3);
    other.append(1);
    other.insert(2, 3);
    assert_eq!(
        other, buf,
        "Buffers with the same slots should be equal however they were built."
    );

    other.replace(1, 2);
    assert_ne!(other, buf, "A differing slot should break equality.");
    assert_ne!(
        StaticBuffer::<i32>::new(3),
        StaticBuffer::<i32>::new(4),
        "Differing capacities should break equality."
    );
}

#[test]
fn test_into_iter_yields_all_slots() {
    let mut buf = StaticBuffer::from([1, 2, 3, 4]);
    buf.remove(1);

    let mut iter = buf.into_iter();
    assert_eq!(iter.len(), 4, "The iterator should cover every slot.");
    assert_eq!(iter.next(), Some(Some(1)));
    assert_eq!(iter.next(), Some(None), "Holes should come through as None.");
    assert_eq!(iter.next_back(), Some(Some(4)), "Iteration should work from the back.");
    assert_eq!(iter.next(), Some(Some(3)));
    assert_eq!(iter.next(), None, "An exhausted iterator should stay exhausted.");
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_borrowed_iteration() {
    let buf = StaticBuffer::from([1, 2]);
    let mut total = 0;

    for slot in &buf {
        total += slot.unwrap_or(0);
    }
    assert_eq!(total, 3, "Borrowed iteration should visit every slot.");
    assert_eq!(
        buf.iter().flatten().count(),
        2,
        "Flattening should count only occupants."
    );
}

#[test]
fn test_drop_counts() {
    let counter = CountedDrop::new(0);

    {
        let mut buf = StaticBuffer::new(6);
        for value in iter::repeat_with(|| counter.clone()).take(4) {
            buf.append(value);
        }

        drop(buf.remove(1));
        assert_eq!(
            counter.take(),
            1,
            "A removed occupant should drop once discarded."
        );

        drop(buf.replace(0, counter.clone()));
        assert_eq!(
            counter.take(),
            1,
            "A replaced occupant should drop once discarded."
        );
    }
    assert_eq!(
        counter.take(),
        3,
        "Dropping the buffer should drop every remaining occupant."
    );

    let mut buf = StaticBuffer::new(3);
    buf.append(counter.clone());
    buf.append(counter.clone());
    buf.clear();
    assert_eq!(counter.take(), 2, "Clearing should drop every occupant.");

    buf.append(counter.clone());
    buf.append(counter.clone());
    buf.append(counter.clone());
    let mut iter = buf.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(
        counter.take(),
        3,
        "Dropping a part-consumed iterator should drop the unread occupants."
    );
}

#[test]
fn test_zero_capacity() {
    let mut buf = StaticBuffer::<u8>::default();

    assert_eq!(buf.cap(), 0, "The default buffer should have no slots.");
    assert!(buf.try_append(1).is_err(), "There is nowhere to append to.");
    assert!(buf.try_get(0).is_err(), "There is nothing to read.");
    assert!(buf.try_insert(0, 1).is_err(), "There is nowhere to insert.");
}

#[test]
fn test_dynamic_append_grows_by_increment() {
    let mut buf = DynamicBuffer::with_increment(2, 2);
    buf.append(1);
    buf.append(2);
    assert_eq!(buf.cap(), 2, "No growth should happen while there is room.");

    buf.append(3);
    assert_eq!(buf.cap(), 4, "The third append should grow by one increment.");
    assert_eq!(buf.len(), 3);
    assert_eq!(
        buf.slots(),
        [Some(1), Some(2), Some(3), None],
        "Growth should leave existing occupants in place."
    );

    assert_eq!(buf.get(-4), Some(&1), "Negative addresses should use the new capacity.");
    assert_eq!(buf.get(-2), Some(&3));
    assert_eq!(buf.increment(), 2, "Growth should not change the increment.");
    assert_mirrored!(buf);
}

#[test]
fn test_dynamic_append_grows_past_holes() {
    let mut buf = DynamicBuffer::with_increment(2, 2);
    buf.append(1);
    buf.append(2);
    buf.remove(0);

    buf.append(3);
    assert_eq!(
        buf.slots(),
        [None, Some(2), Some(3), None],
        "Appending should grow past the watermark rather than refill holes."
    );
    assert_eq!(buf.cap(), 4, "The hole should not have prevented growth.");
}

#[test]
fn test_dynamic_insert_grows_to_reach_index() {
    let mut buf = DynamicBuffer::with_increment(3, 3);

    buf.insert(4, 9);
    assert_eq!(buf.cap(), 6, "An index past the capacity should grow the buffer.");
    assert_eq!(buf.get(4), Some(&9));
    assert_eq!(
        buf.core.watermark, 5,
        "The insert should raise the watermark over the landed slot."
    );

    let mut buf = DynamicBuffer::<u8>::with_increment(4, 1);
    buf.insert(7, 9);
    assert_eq!(
        buf.cap(),
        8,
        "A small increment should grow repeatedly until the index is addressable."
    );
    assert_eq!(buf.get(7), Some(&9));
}

#[test]
fn test_dynamic_insert_window_bounds() {
    let mut buf = DynamicBuffer::<u8>::with_increment(3, 3);

    assert_eq!(
        buf.try_insert(6, 9),
        Err(IndexError::OutOfBoundary(OutOfBoundary { index: 6, extent: 6 })),
        "Twice the capacity should be the first unreachable index."
    );
    assert_eq!(buf.cap(), 3, "A rejected insert should not grow the buffer.");

    assert!(
        buf.try_insert(-6, 9).is_ok(),
        "Negative indexes should reach twice the capacity inclusively."
    );
    assert_eq!(
        buf.cap(),
        6,
        "A negative index beyond the capacity should have triggered growth."
    );
    assert_eq!(buf.get(0), Some(&9), "-2 * capacity should resolve to slot 0.");

    assert!(
        buf.try_insert(-13, 9).is_err(),
        "Indexes below the doubled negative capacity should be rejected."
    );
}

#[test]
fn test_dynamic_full_insert_spills_into_growth() {
    let mut buf = DynamicBuffer::with_increment(3, 3);
    buf.append(1);
    buf.append(2);
    buf.append(3);

    buf.insert(1, 9);
    assert_eq!(buf.cap(), 6, "A completely full insert should grow once.");
    assert_eq!(
        buf.slots(),
        [Some(1), Some(9), Some(2), Some(3), None, None],
        "Occupants from the index should spill right into the grown region."
    );
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.core.watermark, 4, "The spill should extend the watermark by one.");
    assert_mirrored!(buf);
}

#[test]
fn test_dynamic_reads_never_grow() {
    let mut buf = DynamicBuffer::with_increment(2, 2);
    buf.append(1);

    assert!(
        buf.try_get(2).is_err(),
        "Reads should resolve strictly against the current capacity."
    );
    assert!(buf.try_replace(2, 9).is_err(), "Replacing should never grow.");
    assert!(buf.try_remove(-3).is_err(), "Removing should never grow.");
    assert_eq!(buf.cap(), 2, "Failed reads should leave the capacity alone.");
}

#[test]
fn test_dynamic_increment_validation() {
    assert_panics!({
        DynamicBuffer::<u8>::with_increment(4, 0);
    });
    assert_panics!({
        DynamicBuffer::<u8>::new(0);
    });

    let buf = DynamicBuffer::<u8>::default();
    assert_eq!(buf.cap(), 0, "The default buffer should start with no slots.");
    assert_eq!(buf.increment(), 1, "The default buffer should still be able to grow.");
}

#[test]
fn test_dynamic_map_keeps_shape() {
    let mut buf = DynamicBuffer::with_increment(2, 2);
    buf.append(1);
    buf.append(2);
    buf.append(3);
    buf.remove(1);

    let mapped = buf.map(|_, slot| slot.map(|v| v + 100));
    assert_eq!(
        mapped.slots(),
        [Some(101), None, Some(103), None],
        "Mapping should transform occupants and keep holes."
    );
    assert_eq!(mapped.cap(), 4, "Mapping should preserve the grown capacity.");
    assert_eq!(mapped.increment(), 2, "Mapping should preserve the increment.");
}

#[test]
fn test_factory_selects_variant() {
    let stat = Buffer::<u8>::create(ContainerKind::StaticBuffer, 3, None).unwrap();
    assert!(stat.is_static(), "The static kind should produce a static buffer.");
    assert_eq!(stat.increment(), None, "Static buffers have no increment.");

    let dynamic = Buffer::<u8>::create(ContainerKind::DynamicBuffer, 3, None).unwrap();
    assert!(dynamic.is_dynamic(), "The dynamic kind should produce a dynamic buffer.");
    assert_eq!(
        dynamic.increment(),
        Some(3),
        "The increment should default to the capacity."
    );

    let pinned = Buffer::<u8>::create(ContainerKind::DynamicBuffer, 3, Some(0)).unwrap();
    assert!(
        pinned.is_static(),
        "A zero increment should pin the capacity and produce a static buffer."
    );

    let sized = Buffer::<u8>::create(ContainerKind::DynamicBuffer, 3, Some(5)).unwrap();
    assert_eq!(sized.increment(), Some(5), "An explicit increment should be kept.");

    assert_eq!(
        Buffer::<u8>::create(ContainerKind::LinkedSequence, 3, None),
        Err(InvalidDataType { kind: ContainerKind::LinkedSequence }),
        "The factory only builds buffers."
    );
    assert_panics!({
        Buffer::<u8>::create(ContainerKind::DynamicBuffer, 0, None).unwrap();
    });
}

#[test]
fn test_factory_buffer_delegates() {
    let mut buf = Buffer::create(ContainerKind::DynamicBuffer, 2, Some(2)).unwrap();
    buf.append(1);
    buf.append(2);
    buf.append(3);

    assert_eq!(buf.cap(), 4, "The wrapped dynamic buffer should have grown.");
    assert_eq!(buf.get(2), Some(&3), "Reads should reach the wrapped buffer.");
    assert_eq!(buf[-2], Some(3), "The index operator should delegate too.");

    buf.insert(1, 9);
    assert_eq!(buf.index_of(&9), Some(1), "Search should delegate.");
    assert_eq!(buf.remove(0), Some(1), "Removal should delegate.");
    assert_eq!(buf.len(), 3);

    let mapped = buf.map(|_, slot| slot.copied());
    assert!(mapped.is_dynamic(), "Mapping should preserve the variant.");
    assert_eq!(mapped.slots(), buf.slots(), "An identity mapping should copy the slots.");

    let mut stat = Buffer::create(ContainerKind::StaticBuffer, 1, None).unwrap();
    assert!(stat.try_append(1).is_ok());
    assert!(
        stat.try_append(2).is_err(),
        "The wrapped static buffer should still refuse overflow."
    );

    let mut iter = mapped.into_iter();
    assert_eq!(iter.next(), Some(None), "The hole at slot 0 should come through first.");
    assert_eq!(iter.next(), Some(Some(9)), "Owned iteration should delegate.");
    assert_eq!(iter.len(), 2);
}

#[test]
fn test_display_formats() {
    let mut buf = StaticBuffer::from([1, 2]);
    buf.remove(0);

    assert_eq!(
        format!("{buf}"),
        "[None, Some(2)]",
        "Display should show the slots as a list."
    );
    assert!(
        format!("{buf:?}").starts_with("StaticBuffer"),
        "Debug should name the type."
    );
}
