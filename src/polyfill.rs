//! Float helpers used to size the count-min sketch.
//! Without `std` they fall back to libm's port of musl's libc,
//! so `no_std` builds need the `libm` feature.

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        #[inline(always)]
        pub(crate) fn ceil(val: f64) -> f64 {
            val.ceil()
        }
        #[inline(always)]
        pub(crate) fn ln(val: f64) -> f64 {
            val.ln()
        }
    } else if #[cfg(feature = "libm")] {
        #[inline(always)]
        pub(crate) fn ceil(val: f64) -> f64 {
            libm::ceil(val)
        }
        #[inline(always)]
        pub(crate) fn ln(val: f64) -> f64 {
            libm::log(val)
        }
    } else {
        compile_error!("heavy-hitters needs either the `std` or the `libm` feature for float math");
    }
}

#[cfg(test)]
mod test {
    use super::{ceil, ln};

    #[test]
    fn test_polyfill() {
        assert_eq!(ceil(2.0001), 3.0);
        assert_eq!(ceil(-0.5), 0.0);
        assert!((ln(core::f64::consts::E) - 1.0).abs() < 1e-12);
        assert_eq!(ln(1.0), 0.0);
    }
}
