/// A storage gate for values entering a [`LinkedSequence`].
///
/// [`LinkedSequence`]: crate::collections::sequence::LinkedSequence
///
/// The sequence only ever stores acceptable values: bulk operations skip
/// anything unacceptable, while positional operations report it as an error.
/// Most types are unconditionally acceptable and only opt out of degenerate
/// values, such as non-finite floats or empty strings, which behave as
/// "nothing here" in the dataset the sequence models.
pub trait Acceptable {
    /// Returns whether the value may be stored.
    fn is_acceptable(&self) -> bool;
}

macro_rules! always_acceptable {
    ($($type:ty),* $(,)?) => {
        $(
            impl Acceptable for $type {
                fn is_acceptable(&self) -> bool {
                    true
                }
            }
        )*
    };
}

always_acceptable!(
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    bool, char,
);

impl Acceptable for f32 {
    fn is_acceptable(&self) -> bool {
        self.is_finite()
    }
}

impl Acceptable for f64 {
    fn is_acceptable(&self) -> bool {
        self.is_finite()
    }
}

impl Acceptable for str {
    fn is_acceptable(&self) -> bool {
        !self.is_empty()
    }
}

impl Acceptable for String {
    fn is_acceptable(&self) -> bool {
        !self.is_empty()
    }
}

/// [`None`] is never acceptable; [`Some`] defers to the wrapped value.
impl<T: Acceptable> Acceptable for Option<T> {
    fn is_acceptable(&self) -> bool {
        match self {
            Some(value) => value.is_acceptable(),
            None => false,
        }
    }
}

impl<T: Acceptable + ?Sized> Acceptable for &T {
    fn is_acceptable(&self) -> bool {
        (**self).is_acceptable()
    }
}

impl<T: Acceptable + ?Sized> Acceptable for &mut T {
    fn is_acceptable(&self) -> bool {
        (**self).is_acceptable()
    }
}

impl<T: Acceptable + ?Sized> Acceptable for Box<T> {
    fn is_acceptable(&self) -> bool {
        (**self).is_acceptable()
    }
}
