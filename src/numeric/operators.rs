// ============================================================================
// Operator Synthesis
// Full operator surface derived from a small set of primitives
// ============================================================================
//
// A type implements the primitive in-place operations of the three traits
// below; every other operator comes from the provided methods:
//
// - OrderedField: +=, -=, *=, /=, <, == -> +, -, *, /, >, <=, >=, !=
// - UnitSteppable: step up/down -> pre/post increment and decrement
// - Shiftable: <<=, >>= -> <<, >>
//
// `impl_synthesized_operators!` then binds the std operator traits to those
// provided methods, for generic and concrete types alike.

use std::cmp::Ordering;

/// Arithmetic and ordering derived from compound assignment, `<` and `==`.
pub trait OrderedField: Copy {
    fn add_in_place(&mut self, rhs: &Self);

    fn sub_in_place(&mut self, rhs: &Self);

    fn mul_in_place(&mut self, rhs: &Self);

    fn div_in_place(&mut self, rhs: &Self);

    fn less_than(&self, rhs: &Self) -> bool;

    fn equals(&self, rhs: &Self) -> bool;

    #[inline]
    fn added(self, rhs: Self) -> Self {
        let mut out = self;
        out.add_in_place(&rhs);
        out
    }

    #[inline]
    fn subtracted(self, rhs: Self) -> Self {
        let mut out = self;
        out.sub_in_place(&rhs);
        out
    }

    #[inline]
    fn multiplied(self, rhs: Self) -> Self {
        let mut out = self;
        out.mul_in_place(&rhs);
        out
    }

    #[inline]
    fn divided(self, rhs: Self) -> Self {
        let mut out = self;
        out.div_in_place(&rhs);
        out
    }

    #[inline]
    fn greater_than(&self, rhs: &Self) -> bool {
        rhs.less_than(self)
    }

    #[inline]
    fn less_equal(&self, rhs: &Self) -> bool {
        !rhs.less_than(self)
    }

    #[inline]
    fn greater_equal(&self, rhs: &Self) -> bool {
        !self.less_than(rhs)
    }

    #[inline]
    fn not_equal(&self, rhs: &Self) -> bool {
        !self.equals(rhs)
    }

    /// Total order assembled from `equals` and `less_than`.
    #[inline]
    fn ordering(&self, rhs: &Self) -> Ordering {
        if self.equals(rhs) {
            Ordering::Equal
        } else if self.less_than(rhs) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Pre/post increment and decrement derived from a unit step.
pub trait UnitSteppable: Copy {
    fn step_up(&mut self);

    fn step_down(&mut self);

    /// `++x`: steps, then yields the new value.
    #[inline]
    fn pre_increment(&mut self) -> Self {
        self.step_up();
        *self
    }

    /// `x++`: yields the value held before stepping.
    #[inline]
    fn post_increment(&mut self) -> Self {
        let previous = *self;
        self.step_up();
        previous
    }

    #[inline]
    fn pre_decrement(&mut self) -> Self {
        self.step_down();
        *self
    }

    #[inline]
    fn post_decrement(&mut self) -> Self {
        let previous = *self;
        self.step_down();
        previous
    }
}

/// Non-mutating shifts derived from the compound shifts.
pub trait Shiftable: Copy {
    fn shl_in_place(&mut self, n: u32);

    fn shr_in_place(&mut self, n: u32);

    #[inline]
    fn shifted_left(self, n: u32) -> Self {
        let mut out = self;
        out.shl_in_place(n);
        out
    }

    #[inline]
    fn shifted_right(self, n: u32) -> Self {
        let mut out = self;
        out.shr_in_place(n);
        out
    }
}

/// Bind the std operator traits to [`OrderedField`] and [`Shiftable`].
///
/// Generic parameters go in brackets ahead of the type:
///
/// ```ignore
/// impl_synthesized_operators!([B: Storage, const I: u32, const F: u32] FixedPoint<B, I, F>);
/// impl_synthesized_operators!(Celsius);
/// ```
///
/// Generates `Add`, `Sub`, `Mul`, `Div` and their assigning forms,
/// `Shl<u32>`/`Shr<u32>` and their assigning forms, `PartialEq`, `Eq`,
/// `PartialOrd` and `Ord`. [`UnitSteppable`] has no std operator to bind.
#[macro_export]
macro_rules! impl_synthesized_operators {
    ([$($gen:tt)*] $ty:ty) => {
        $crate::impl_synthesized_operators!(@arith [$($gen)*] $ty, Add add AddAssign add_assign add_in_place added);
        $crate::impl_synthesized_operators!(@arith [$($gen)*] $ty, Sub sub SubAssign sub_assign sub_in_place subtracted);
        $crate::impl_synthesized_operators!(@arith [$($gen)*] $ty, Mul mul MulAssign mul_assign mul_in_place multiplied);
        $crate::impl_synthesized_operators!(@arith [$($gen)*] $ty, Div div DivAssign div_assign div_in_place divided);
        $crate::impl_synthesized_operators!(@shift [$($gen)*] $ty, Shl shl ShlAssign shl_assign shl_in_place shifted_left);
        $crate::impl_synthesized_operators!(@shift [$($gen)*] $ty, Shr shr ShrAssign shr_assign shr_in_place shifted_right);

        impl<$($gen)*> ::core::cmp::PartialEq for $ty {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                $crate::numeric::OrderedField::equals(self, other)
            }

            #[allow(clippy::partialeq_ne_impl)]
            #[inline]
            fn ne(&self, other: &Self) -> bool {
                $crate::numeric::OrderedField::not_equal(self, other)
            }
        }

        impl<$($gen)*> ::core::cmp::Eq for $ty {}

        impl<$($gen)*> ::core::cmp::PartialOrd for $ty {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some($crate::numeric::OrderedField::ordering(self, other))
            }

            #[inline]
            fn lt(&self, other: &Self) -> bool {
                $crate::numeric::OrderedField::less_than(self, other)
            }

            #[inline]
            fn le(&self, other: &Self) -> bool {
                $crate::numeric::OrderedField::less_equal(self, other)
            }

            #[inline]
            fn gt(&self, other: &Self) -> bool {
                $crate::numeric::OrderedField::greater_than(self, other)
            }

            #[inline]
            fn ge(&self, other: &Self) -> bool {
                $crate::numeric::OrderedField::greater_equal(self, other)
            }
        }

        impl<$($gen)*> ::core::cmp::Ord for $ty {
            #[inline]
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                $crate::numeric::OrderedField::ordering(self, other)
            }
        }
    };
    (@arith [$($gen:tt)*] $ty:ty, $op:ident $method:ident $op_assign:ident $method_assign:ident $prim:ident $derived:ident) => {
        impl<$($gen)*> ::core::ops::$op_assign for $ty {
            #[inline]
            fn $method_assign(&mut self, rhs: Self) {
                $crate::numeric::OrderedField::$prim(self, &rhs);
            }
        }

        impl<$($gen)*> ::core::ops::$op for $ty {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                $crate::numeric::OrderedField::$derived(self, rhs)
            }
        }
    };
    (@shift [$($gen:tt)*] $ty:ty, $op:ident $method:ident $op_assign:ident $method_assign:ident $prim:ident $derived:ident) => {
        impl<$($gen)*> ::core::ops::$op_assign<u32> for $ty {
            #[inline]
            fn $method_assign(&mut self, n: u32) {
                $crate::numeric::Shiftable::$prim(self, n);
            }
        }

        impl<$($gen)*> ::core::ops::$op<u32> for $ty {
            type Output = Self;

            #[inline]
            fn $method(self, n: u32) -> Self {
                $crate::numeric::Shiftable::$derived(self, n)
            }
        }
    };
    ($ty:ty) => {
        $crate::impl_synthesized_operators!([] $ty);
    };
}
