use chrono::NaiveDate;
use epiweek_br::EpidemiologicalWeek;

fn main() {
    let dates = [
        (2019, 1, 1),
        (2020, 3, 15),
        (2021, 1, 2),
        (2021, 1, 3),
        (2011, 12, 31),
    ];

    for (year, month, day) in dates {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        match EpidemiologicalWeek::for_date(date) {
            Ok(week) => println!("{date} -> {week}"),
            Err(err) => println!("{date} -> {err}"),
        }
    }
}
