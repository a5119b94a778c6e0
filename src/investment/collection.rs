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
use crate::investment::order::LotOrder;
use crate::reports::renderer::Renderer;
use crate::util::amount::Cents;
use tracing::debug;

/// Short column labels for tables, in field order.
pub const SHORT_HEADERS: [&str; 12] = [
	"Num", "Symb", "Desc", "Buy Date", "Basis", "Sell Date", "Proceeds",
	"AdjCode", "Adj", "Pos", "BuyLot", "IsRepl",
];

/// An ordered set of lots. Order is insertion order until sorted.
///
/// Every lot that goes in through `new` leaves with a buy lot identifier;
/// those without one are given "_1", "_2", ... in the order they appear.
#[derive(Debug, Default)]
pub struct LotCollection {
	lots: Vec<Lot>,
}

impl LotCollection {
	pub fn new(mut lots: Vec<Lot>) -> Self {
		let mut next_id = 1;
		for lot in lots.iter_mut() {
			if lot.buy_lot.is_empty() {
				lot.buy_lot = format!("_{}", next_id);
				next_id += 1;
			}
		}

		if next_id > 1 {
			debug!("assigned {} synthetic buy lots", next_id - 1);
		}

		Self { lots }
	}

	/// Appends without assigning a buy lot; the caller must set one.
	pub fn add(&mut self, lot: Lot) {
		self.lots.push(lot);
	}

	pub fn size(&self) -> usize {
		self.lots.len()
	}

	/// Stable in-place sort. Reversing flips the comparison, so lots that
	/// compare equal keep their existing relative order either way.
	pub fn sort(&mut self, order: LotOrder, reverse: bool) {
		debug!("sorting {} lots by {:?}", self.lots.len(), order);
		if reverse {
			self.lots.sort_by(|a, b| order.compare(b, a));
		} else {
			self.lots.sort_by(|a, b| order.compare(a, b));
		}
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Lot> {
		self.lots.iter()
	}

	pub fn lots(&self) -> &[Lot] {
		&self.lots
	}

	/// In-place access for wash sale matching, which rewrites sale and
	/// adjustment fields.
	pub fn lots_mut(&mut self) -> &mut [Lot] {
		&mut self.lots
	}

	pub fn into_lots(self) -> Vec<Lot> {
		self.lots
	}

	/// Sum of every lot's adjustment, or `None` if it overflows.
	pub fn total_adjustment(&self) -> Option<Cents> {
		self.lots
			.iter()
			.try_fold(Cents::zero(), |total, l| total.checked_add(l.adjustment))
	}

	/// Renders all lots as a table. If `matched` is non-empty, a "Matched"
	/// column is appended and marked for each lot that is one of those
	/// exact instances; equal-but-distinct lots are not marked.
	pub fn render(
		&self,
		renderer: &dyn Renderer,
		matched: Option<&[&Lot]>,
	) -> String {
		let matched = matched.filter(|m| !m.is_empty());
		let mut header: Vec<String> =
			SHORT_HEADERS.iter().map(|s| s.to_string()).collect();
		if matched.is_some() {
			header.push("Matched".to_string());
		}

		let rows: Vec<Vec<String>> = self
			.lots
			.iter()
			.map(|lot| {
				let mut cells = lot.display_fields();
				if let Some(matched) = matched {
					let is_matched = matched.iter().any(|m| std::ptr::eq(*m, lot));
					cells.push(if is_matched { "*" } else { "" }.to_string());
				}
				cells
			})
			.collect();

		renderer.render(&header, &rows)
	}
}

impl<'a> IntoIterator for &'a LotCollection {
	type Item = &'a Lot;
	type IntoIter = std::slice::Iter<'a, Lot>;

	fn into_iter(self) -> Self::IntoIter {
		self.lots.iter()
	}
}

/// Positional equality over the common prefix: a collection that merely
/// has extra lots at the end still compares equal.
impl PartialEq for LotCollection {
	fn eq(&self, other: &Self) -> bool {
		self.lots.iter().zip(other.lots.iter()).all(|(a, b)| a == b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reports::renderer::{BoxedRenderer, PlainRenderer};
	use crate::util::date::Date;

	fn lot(buy: &str, sell: Option<&str>, form_position: &str, buy_lot: &str) -> Lot {
		Lot::new(
			10,
			"ABC",
			"A",
			Date::from_disk_str(buy).unwrap(),
			Cents(200000),
			sell.map(|s| Date::from_disk_str(s).unwrap()),
			Cents(if sell.is_some() { 180000 } else { 0 }),
			"",
			Cents(0),
			form_position,
			buy_lot,
			false,
		)
	}

	#[test]
	fn test_synthetic_buy_lots() {
		let lots = LotCollection::new(vec![
			lot("09/15/2014", None, "a", ""),
			lot("09/15/2014", None, "b", ""),
			lot("09/15/2014", None, "c", ""),
		]);
		let ids: Vec<&str> = lots.iter().map(|l| l.buy_lot.as_str()).collect();
		assert_eq!(ids, vec!["_1", "_2", "_3"]);
	}

	#[test]
	fn test_preset_buy_lot_keeps_its_id_and_slot() {
		let lots = LotCollection::new(vec![
			lot("09/15/2014", None, "a", ""),
			lot("09/15/2014", None, "b", "mine"),
			lot("09/15/2014", None, "c", ""),
		]);
		let ids: Vec<&str> = lots.iter().map(|l| l.buy_lot.as_str()).collect();
		assert_eq!(ids, vec!["_1", "mine", "_2"]);
	}

	#[test]
	fn test_add_does_not_assign() {
		let mut lots = LotCollection::new(vec![]);
		lots.add(lot("09/15/2014", None, "a", ""));
		assert_eq!(lots.size(), 1);
		assert_eq!(lots.lots()[0].buy_lot, "");
	}

	#[test]
	fn test_sort_by_buy_date() {
		let mut lots = LotCollection::new(vec![
			lot("09/15/2014", None, "b", "1"),
			lot("09/20/2014", Some("10/01/2014"), "c", "2"),
			lot("09/15/2014", Some("10/05/2014"), "a", "3"),
		]);
		lots.sort(LotOrder::BuyDate, false);
		let ids: Vec<&str> = lots.iter().map(|l| l.buy_lot.as_str()).collect();
		assert_eq!(ids, vec!["3", "1", "2"]);

		lots.sort(LotOrder::SellDate, false);
		let ids: Vec<&str> = lots.iter().map(|l| l.buy_lot.as_str()).collect();
		assert_eq!(ids, vec!["2", "3", "1"]);
	}

	#[test]
	fn test_sort_is_stable() {
		let mut lots = LotCollection::new(vec![
			lot("09/15/2014", None, "a", "first"),
			lot("09/01/2014", None, "a", "other"),
			lot("09/15/2014", None, "a", "second"),
		]);
		lots.sort(LotOrder::NumShares, false);
		let ids: Vec<&str> = lots.iter().map(|l| l.buy_lot.as_str()).collect();
		assert_eq!(ids, vec!["first", "other", "second"]);

		lots.sort(LotOrder::BuyDate, true);
		let ids: Vec<&str> = lots.iter().map(|l| l.buy_lot.as_str()).collect();
		assert_eq!(ids, vec!["first", "second", "other"]);
	}

	#[test]
	fn test_iteration_is_restartable() {
		let lots = LotCollection::new(vec![
			lot("09/15/2014", None, "a", ""),
			lot("09/16/2014", None, "b", ""),
		]);
		assert_eq!(lots.iter().count(), 2);
		assert_eq!((&lots).into_iter().count(), 2);
	}

	#[test]
	fn test_external_mutation() {
		let mut lots = LotCollection::new(vec![lot("09/15/2014", None, "a", "")]);
		for l in lots.lots_mut() {
			l.adjustment_code = "W".to_string();
			l.adjustment = Cents(2000);
			l.basis = l.basis + Cents(2000);
			l.loss_processed = true;
		}
		assert_eq!(lots.lots()[0].basis, Cents(202000));
		assert!(lots.into_lots()[0].loss_processed);
	}

	#[test]
	fn test_total_adjustment() {
		let mut lots = LotCollection::new(vec![
			lot("09/15/2014", None, "a", ""),
			lot("09/16/2014", None, "b", ""),
		]);
		assert_eq!(lots.total_adjustment(), Some(Cents(0)));

		lots.lots_mut()[0].adjustment = Cents(2000);
		lots.lots_mut()[1].adjustment = Cents(-500);
		assert_eq!(lots.total_adjustment(), Some(Cents(1500)));

		lots.lots_mut()[0].adjustment = Cents(i64::MAX);
		lots.lots_mut()[1].adjustment = Cents(1);
		assert_eq!(lots.total_adjustment(), None);
	}

	#[test]
	fn test_equality() {
		let a = LotCollection::new(vec![lot("09/15/2014", None, "a", "")]);
		let b = LotCollection::new(vec![lot("09/15/2014", None, "a", "")]);
		let c = LotCollection::new(vec![lot("09/16/2014", None, "a", "")]);
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn test_equality_ignores_trailing_lots() {
		// zip-style comparison: only the common prefix is compared
		let short = LotCollection::new(vec![lot("09/15/2014", None, "a", "")]);
		let long = LotCollection::new(vec![
			lot("09/15/2014", None, "a", ""),
			lot("09/16/2014", None, "b", ""),
		]);
		assert_eq!(short, long);
		assert_eq!(long, short);
		assert_eq!(LotCollection::default(), long);
	}

	#[test]
	fn test_render_plain() {
		let lots = LotCollection::new(vec![lot("09/15/2014", Some("10/05/2014"), "a", "")]);
		assert_eq!(
			lots.render(&PlainRenderer, None),
			"Num Symb Desc Buy Date Basis Sell Date Proceeds AdjCode Adj Pos BuyLot IsRepl\n\
			 10 ABC A 2014-09-15 $2000.00 2014-10-05 $1800.00  $0.00 a _1 False"
		);
	}

	#[test]
	fn test_render_marks_matched_by_identity() {
		let lots = LotCollection::new(vec![
			lot("09/15/2014", None, "a", "same"),
			lot("09/15/2014", None, "a", "same"),
		]);
		assert_eq!(lots.lots()[0], lots.lots()[1]);

		let matched = [&lots.lots()[1]];
		let out = lots.render(&PlainRenderer, Some(&matched[..]));
		let lines: Vec<&str> = out.lines().collect();
		assert!(lines[0].ends_with(" IsRepl Matched"));
		assert!(lines[1].ends_with(" False "));
		assert!(lines[2].ends_with(" False *"));
	}

	#[test]
	fn test_render_empty_match_set_has_no_column() {
		let lots = LotCollection::new(vec![lot("09/15/2014", None, "a", "")]);
		assert_eq!(
			lots.render(&PlainRenderer, Some(&[][..])),
			lots.render(&PlainRenderer, None)
		);
	}

	#[test]
	fn test_render_boxed() {
		let lots = LotCollection::new(vec![lot("09/15/2014", None, "a", "")]);
		let matched = [&lots.lots()[0]];
		let out = lots.render(&BoxedRenderer, Some(&matched[..]));
		let lines: Vec<&str> = out.lines().collect();
		assert_eq!(lines.len(), 5);
		assert!(lines[0].starts_with("+-----+"));
		assert!(lines[1].starts_with("| Num | Symb |"));
		assert!(lines[1].ends_with("| Matched |"));
		assert!(lines[3].starts_with("| 10  | ABC  |"));
		assert!(lines[3].ends_with("| *       |"));

		let out = lots.render(&BoxedRenderer, Some(&[][..]));
		assert!(out.lines().nth(1).unwrap().ends_with("| IsRepl |"));
	}
}
