//! Operator boilerplate for single-field newtypes.
//!
//! Amount types in this workspace are thin wrappers around `i64`. The `op!` macro generates the
//! arithmetic trait impls so that each newtype doesn't have to spell them out by hand.

/// Generate an operator impl for a newtype wrapping a single numeric field.
///
/// * `op!(binary T, Add, add)` implements `T + T -> T`.
/// * `op!(inplace T, AddAssign, add_assign)` implements `T += T`.
/// * `op!(unary T, Neg, neg)` implements `-T`.
#[macro_export]
macro_rules! op {
    (binary $type:ty, $trait:ident, $method:ident) => {
        impl $trait for $type {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                Self(self.0.$method(rhs.0))
            }
        }
    };

    (inplace $type:ty, $trait:ident, $method:ident) => {
        impl $trait for $type {
            fn $method(&mut self, rhs: Self) {
                self.0.$method(rhs.0)
            }
        }
    };

    (unary $type:ty, $trait:ident, $method:ident) => {
        impl $trait for $type {
            type Output = Self;

            fn $method(self) -> Self::Output {
                Self(self.0.$method())
            }
        }
    };
}
