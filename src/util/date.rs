/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar date. Lot files store these as MM/DD/YYYY; brokerage
/// statements use MM/DD/YY. Displays as YYYY-MM-DD.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
	const DISK_FORMAT: &'static str = "%m/%d/%Y";
	const SHORT_YEAR_FORMAT: &'static str = "%m/%d/%y";

	pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Date, Error> {
		NaiveDate::from_ymd_opt(year, month, day)
			.map(Date)
			.ok_or_else(|| anyhow!("Invalid date {}-{}-{}", year, month, day))
	}

	/// Parses the on-disk "MM/DD/YYYY" format. The year must have exactly
	/// four digits.
	pub fn from_disk_str(date_str: &str) -> Result<Date, Error> {
		let year = date_str.rsplit('/').next().unwrap_or_default();
		if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
			bail!("Date format must be MM/DD/YYYY");
		}

		NaiveDate::parse_from_str(date_str, Date::DISK_FORMAT)
			.map(Date)
			.map_err(|e| anyhow!("Invalid date '{}': {}", date_str, e))
	}

	/// Parses the "MM/DD/YY" format found on brokerage statements. The
	/// century is resolved by chrono's two-digit year pivot.
	pub fn from_short_year_str(date_str: &str) -> Result<Date, Error> {
		NaiveDate::parse_from_str(date_str, Date::SHORT_YEAR_FORMAT)
			.map(Date)
			.map_err(|e| anyhow!("Invalid date '{}': {}", date_str, e))
	}

	/// Formats as "MM/DD/YYYY" for writing back to disk.
	pub fn to_disk_string(&self) -> String {
		self.0.format(Date::DISK_FORMAT).to_string()
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{:04}-{:02}-{:02}",
			self.0.year(),
			self.0.month(),
			self.0.day()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_disk_format() {
		let date = Date::from_disk_str("09/15/2014").unwrap();
		assert_eq!(date, Date::from_ymd(2014, 9, 15).unwrap());
		assert_eq!(date.to_disk_string(), "09/15/2014");
		assert_eq!(date.to_string(), "2014-09-15");
	}

	#[test]
	fn test_unpadded_disk_format() {
		let date = Date::from_disk_str("9/5/2014").unwrap();
		assert_eq!(date.to_disk_string(), "09/05/2014");
	}

	#[test]
	fn test_rejects_short_year_on_disk() {
		assert!(Date::from_disk_str("09/15/14").is_err());
		assert!(Date::from_disk_str("2014-09-15").is_err());
		assert!(Date::from_disk_str("02/30/2014").is_err());
		assert!(Date::from_disk_str("").is_err());
	}

	#[test]
	fn test_short_year_format() {
		let date = Date::from_short_year_str("03/01/21").unwrap();
		assert_eq!(date, Date::from_ymd(2021, 3, 1).unwrap());
		let date = Date::from_short_year_str("12/31/99").unwrap();
		assert_eq!(date, Date::from_ymd(1999, 12, 31).unwrap());
	}

	#[test]
	fn test_leap_day() {
		assert!(Date::from_disk_str("02/29/2024").is_ok());
		assert!(Date::from_disk_str("02/29/2023").is_err());
	}

	#[test]
	fn test_crossing_year_boundary() {
		let a = Date::from_disk_str("12/30/2023").unwrap();
		let b = Date::from_disk_str("01/02/2024").unwrap();
		assert!(a < b);
	}
}
