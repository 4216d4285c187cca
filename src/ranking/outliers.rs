//! Median-based price outlier flagging.
//!
//! A statistical pass over the relevant offers: prices far below or
//! above the median are usually wrong listings (an accessory sold under
//! the product's name, a scam, a unit mix-up) and must not win the
//! best-offer selection. The bounds are fixed policy constants, not
//! learned.

use crate::types::Offer;

/// Minimum number of priced relevant offers for the median to mean
/// anything. Below this, nothing is flagged.
const MIN_SAMPLE: usize = 5;

/// An offer is suspiciously cheap below `LOW_FACTOR * median`.
const LOW_FACTOR: f64 = 0.4;

/// An offer is suspiciously expensive above `HIGH_FACTOR * median`.
const HIGH_FACTOR: f64 = 2.5;

/// Flag price outliers among the offers at `relevant` indices.
///
/// `relevant` carries the indices of the relevant subset within
/// `offers` (after the empty-subset fallback, this may be the whole
/// pool). With fewer than [`MIN_SAMPLE`] entries every flag is cleared;
/// otherwise offers priced outside `[0.4, 2.5] × median` are marked.
pub fn flag_price_outliers(offers: &mut [Offer], relevant: &[usize]) {
    if relevant.len() < MIN_SAMPLE {
        for &i in relevant {
            offers[i].price_outlier = false;
        }
        return;
    }

    let prices: Vec<f64> = relevant.iter().map(|&i| offers[i].price).collect();
    let median = median(prices);

    for &i in relevant {
        let price = offers[i].price;
        offers[i].price_outlier = price < LOW_FACTOR * median || price > HIGH_FACTOR * median;
    }
}

/// Median of a non-empty sample; even-sized samples average the two
/// middle values.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
