//! # Primitive Draws
//!
//! Distributions for the nine primitive shapes.
//!
//! | Shape     | Distribution                                                |
//! |-----------|-------------------------------------------------------------|
//! | Bool      | fair coin                                                   |
//! | Bytes     | `0..=size` uniform bytes                                    |
//! | Int32/64  | uniform over the whole domain                               |
//! | Float32/64| uniform in `[-size, size]`, always finite                   |
//! | String    | `0..=size` uniform Unicode scalar values                    |
//! | Date      | uniform day between chrono's earliest and latest dates      |
//! | Datetime  | a Date plus a uniform microsecond time of day               |

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rand::Rng;

use crate::generator::GenContext;

/// Last microsecond of a day.
pub const MAX_MICROS_OF_DAY: u64 = 86_399_999_999;

pub fn gen_bool(ctx: &mut GenContext<'_>) -> bool {
    ctx.rng().gen()
}

pub fn gen_bytes(ctx: &mut GenContext<'_>) -> Vec<u8> {
    let len = ctx.sized_len();
    let mut out = vec![0u8; len];
    ctx.rng().fill(out.as_mut_slice());
    out
}

pub fn gen_i32(ctx: &mut GenContext<'_>) -> i32 {
    ctx.rng().gen()
}

pub fn gen_i64(ctx: &mut GenContext<'_>) -> i64 {
    ctx.rng().gen()
}

pub fn gen_f32(ctx: &mut GenContext<'_>) -> f32 {
    let bound = ctx.size() as f32;
    ctx.rng().gen_range(-bound..=bound)
}

pub fn gen_f64(ctx: &mut GenContext<'_>) -> f64 {
    let bound = ctx.size() as f64;
    ctx.rng().gen_range(-bound..=bound)
}

pub fn gen_string(ctx: &mut GenContext<'_>) -> String {
    let len = ctx.sized_len();
    (0..len).map(|_| ctx.rng().gen::<char>()).collect()
}

/// A day counted from 0001-01-01, anywhere in chrono's representable range.
pub fn gen_date(ctx: &mut GenContext<'_>) -> NaiveDate {
    let first = NaiveDate::MIN.num_days_from_ce();
    let last = NaiveDate::MAX.num_days_from_ce();
    let day = ctx.rng().gen_range(first..=last);
    // Every day in [first, last] is representable.
    NaiveDate::from_num_days_from_ce_opt(day).unwrap_or(NaiveDate::MIN)
}

/// A drawn date at a drawn microsecond of that day, in UTC.
pub fn gen_datetime(ctx: &mut GenContext<'_>) -> DateTime<Utc> {
    let date = gen_date(ctx);
    let micros = ctx.rng().gen_range(0..=MAX_MICROS_OF_DAY);
    let secs = (micros / 1_000_000) as u32;
    let nanos = (micros % 1_000_000) as u32 * 1_000;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&NaiveDateTime::new(date, time))
}
