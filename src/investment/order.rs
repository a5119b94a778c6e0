/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::investment::lot::Lot;
use clap::ValueEnum;
use std::cmp::Ordering;

/// The canonical orderings for lots. Wash sale matching picks candidate lots
/// by walking a collection sorted with one of these, so the tie-break chain
/// of each must stay exactly as listed in its rules.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LotOrder {
	BuyDate,
	SellDate,
	NumShares,
}

/// A single field comparison within an ordering.
#[derive(Clone, Copy, Debug)]
enum Key {
	BuyDate,
	SellDate,
	FormPosition,
	NumShares,
}

#[derive(Clone, Copy, Debug)]
struct Rule {
	key: Key,

	/// For optional keys: whether an absent value sorts after every
	/// present one
	absent_last: bool,
}

impl Rule {
	const fn new(key: Key) -> Self {
		Self {
			key,
			absent_last: false,
		}
	}

	const fn absent_last(key: Key) -> Self {
		Self {
			key,
			absent_last: true,
		}
	}

	fn compare(&self, a: &Lot, b: &Lot) -> Ordering {
		match self.key {
			Key::BuyDate => a.buy_date.cmp(&b.buy_date),
			Key::SellDate => {
				compare_optional(&a.sell_date, &b.sell_date, self.absent_last)
			},
			Key::FormPosition => a.form_position.cmp(&b.form_position),
			Key::NumShares => a.num_shares.cmp(&b.num_shares),
		}
	}
}

fn compare_optional<T: Ord>(
	a: &Option<T>,
	b: &Option<T>,
	absent_last: bool,
) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => a.cmp(b),
		(None, None) => Ordering::Equal,
		(None, Some(_)) if absent_last => Ordering::Greater,
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) if absent_last => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
	}
}

const BY_BUY_DATE: &[Rule] = &[
	Rule::new(Key::BuyDate),
	Rule::absent_last(Key::SellDate),
	Rule::new(Key::FormPosition),
];

const BY_SELL_DATE: &[Rule] = &[
	Rule::absent_last(Key::SellDate),
	Rule::new(Key::BuyDate),
	Rule::new(Key::FormPosition),
];

const BY_NUM_SHARES: &[Rule] = &[Rule::new(Key::NumShares)];

impl LotOrder {
	fn rules(&self) -> &'static [Rule] {
		match self {
			LotOrder::BuyDate => BY_BUY_DATE,
			LotOrder::SellDate => BY_SELL_DATE,
			LotOrder::NumShares => BY_NUM_SHARES,
		}
	}

	/// Applies each rule in turn; the first one that is not Equal decides.
	pub fn compare(&self, a: &Lot, b: &Lot) -> Ordering {
		self.rules()
			.iter()
			.map(|rule| rule.compare(a, b))
			.find(|o| *o != Ordering::Equal)
			.unwrap_or(Ordering::Equal)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::amount::Cents;
	use crate::util::date::Date;

	fn lot(buy: &str, sell: Option<&str>, form_position: &str) -> Lot {
		Lot::new(
			10,
			"ABC",
			"",
			Date::from_disk_str(buy).unwrap(),
			Cents(200000),
			sell.map(|s| Date::from_disk_str(s).unwrap()),
			Cents(0),
			"",
			Cents(0),
			form_position,
			"",
			false,
		)
	}

	#[test]
	fn test_buy_date_unsold_sorts_last() {
		let a = lot("09/15/2014", Some("10/05/2014"), "a");
		let b = lot("09/15/2014", None, "b");
		assert_eq!(LotOrder::BuyDate.compare(&a, &b), Ordering::Less);
		assert_eq!(LotOrder::BuyDate.compare(&b, &a), Ordering::Greater);
	}

	#[test]
	fn test_buy_date_primary_key_wins() {
		// form position and sell date would say otherwise
		let a = lot("09/14/2014", None, "z");
		let b = lot("09/15/2014", Some("09/16/2014"), "a");
		assert_eq!(LotOrder::BuyDate.compare(&a, &b), Ordering::Less);
	}

	#[test]
	fn test_buy_date_falls_back_to_form_position() {
		let a = lot("09/15/2014", Some("10/05/2014"), "a");
		let b = lot("09/15/2014", Some("10/05/2014"), "b");
		assert_eq!(LotOrder::BuyDate.compare(&a, &b), Ordering::Less);
		assert_eq!(LotOrder::BuyDate.compare(&a, &a), Ordering::Equal);
	}

	#[test]
	fn test_sell_date_ordering() {
		let a = lot("09/15/2014", Some("10/05/2014"), "a");
		let c = lot("09/20/2014", Some("10/01/2014"), "c");
		assert_eq!(LotOrder::SellDate.compare(&c, &a), Ordering::Less);
		assert_eq!(LotOrder::SellDate.compare(&a, &c), Ordering::Greater);
	}

	#[test]
	fn test_sell_date_unsold_sorts_last() {
		let a = lot("09/20/2014", Some("10/05/2014"), "a");
		let b = lot("09/15/2014", None, "b");
		assert_eq!(LotOrder::SellDate.compare(&a, &b), Ordering::Less);

		let c = lot("09/10/2014", None, "c");
		assert_eq!(LotOrder::SellDate.compare(&c, &b), Ordering::Less);
	}

	#[test]
	fn test_sell_date_tie_breaks() {
		let a = lot("09/15/2014", Some("10/05/2014"), "b");
		let b = lot("09/16/2014", Some("10/05/2014"), "a");
		assert_eq!(LotOrder::SellDate.compare(&a, &b), Ordering::Less);

		let c = lot("09/15/2014", Some("10/05/2014"), "a");
		assert_eq!(LotOrder::SellDate.compare(&c, &a), Ordering::Less);
	}

	#[test]
	fn test_num_shares_extremes() {
		let mut a = lot("09/15/2014", None, "a");
		let mut b = lot("09/15/2014", None, "b");
		a.num_shares = i64::MIN;
		b.num_shares = i64::MAX;
		assert_eq!(LotOrder::NumShares.compare(&a, &b), Ordering::Less);
		assert_eq!(LotOrder::NumShares.compare(&b, &a), Ordering::Greater);
		b.num_shares = i64::MIN;
		assert_eq!(LotOrder::NumShares.compare(&a, &b), Ordering::Equal);
	}
}
