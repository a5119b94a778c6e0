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
use anyhow::{anyhow, bail, Error};
use regex::Regex;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::sync::OnceLock;

/// A monetary value in minor units (USD cents). Only one currency is ever
/// in play, so none is carried.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Cents(pub i64);

impl Cents {
	pub fn zero() -> Self {
		Cents(0)
	}

	pub fn is_zero(&self) -> bool {
		self.0 == 0
	}

	/// `None` when the sum does not fit in an i64.
	pub fn checked_add(self, rhs: Cents) -> Option<Cents> {
		self.0.checked_add(rhs.0).map(Cents)
	}

	pub fn checked_sub(self, rhs: Cents) -> Option<Cents> {
		self.0.checked_sub(rhs.0).map(Cents)
	}

	/// Parses a dollar string as printed on brokerage statements, e.g.
	/// "$1,234.56", "1234.5", "-$3.00" or "($3.00)".
	pub fn from_dollars(s: &str) -> Result<Self, Error> {
		static DOLLARS: OnceLock<Regex> = OnceLock::new();
		let re = DOLLARS.get_or_init(|| {
			Regex::new(r"^(\()?(-)?\$?(-)?([0-9][0-9,]*)(?:\.([0-9]{1,2}))?\)?$")
				.unwrap()
		});

		let caps = re
			.captures(s.trim())
			.ok_or_else(|| anyhow!("Invalid dollar amount '{}'", s))?;

		let whole: i64 = caps[4]
			.replace(',', "")
			.parse()
			.map_err(|e| anyhow!("Invalid dollar amount '{}': {}", s, e))?;

		let fraction = match caps.get(5) {
			Some(m) if m.as_str().len() == 1 => m.as_str().parse::<i64>()? * 10,
			Some(m) => m.as_str().parse::<i64>()?,
			None => 0,
		};

		let negatives = [1, 2, 3].iter().filter(|i| caps.get(**i).is_some()).count();
		if negatives > 1 {
			bail!("Invalid dollar amount '{}'", s);
		}

		let value = whole
			.checked_mul(100)
			.and_then(|v| v.checked_add(fraction))
			.ok_or_else(|| anyhow!("Dollar amount out of range '{}'", s))?;

		Ok(if negatives == 1 { Cents(-value) } else { Cents(value) })
	}
}

impl Add for Cents {
	type Output = Cents;
	fn add(self, rhs: Self) -> Self::Output {
		Cents(self.0 + rhs.0)
	}
}

impl Sub for Cents {
	type Output = Cents;
	fn sub(self, rhs: Self) -> Self::Output {
		Cents(self.0 - rhs.0)
	}
}

impl Neg for Cents {
	type Output = Cents;
	fn neg(self) -> Self::Output {
		Cents(-self.0)
	}
}

/// Prints as dollars with two decimal places, e.g. "$2000.00" or "$-1.50".
impl fmt::Display for Cents {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let sign = if self.0 < 0 { "-" } else { "" };
		let abs = self.0.unsigned_abs();
		write!(f, "${}{}.{:02}", sign, abs / 100, abs % 100)
	}
}
