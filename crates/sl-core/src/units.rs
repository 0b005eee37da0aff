// sl-core/src/units.rs

use uom::si::f64::{Length as UomLength, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Time = UomTime;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}
