use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use calendar_board::client::HolidayClient;
use calendar_board::storage::FileStorage;
use calendar_board::{Board, DayId, ViewMode};

/// Where tasks are stored, unless overridden by this environment variable
const DATA_FOLDER_VAR: &str = "CALENDAR_BOARD_DATA";
const DEFAULT_DATA_FOLDER: &str = "calendar_board_data";

const USAGE: &str = "Usage:
    calendar-board [YYYY-MM-DD] [month|week]    Display the tasks and holidays of a period
    calendar-board add YYYY-MM-DD <text>        Create a task";


#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let folder = std::env::var(DATA_FOLDER_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FOLDER));
    let storage = FileStorage::in_folder(&folder);

    let holiday_client = match HolidayClient::new() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid holiday API configuration: {}", err);
            std::process::exit(1);
        }
    };

    let today = Local::now().date_naive();
    let mut board = Board::new(storage, holiday_client, today);

    if args.first().map(|a| a.as_str()) == Some("add") {
        let day = match args.get(1).map(|d| d.parse::<DayId>()) {
            Some(Ok(day)) => day,
            _ => {
                eprintln!("{}", USAGE);
                std::process::exit(2);
            }
        };
        let text = args[2..].join(" ");
        match board.add_task(&text, day) {
            Some(id) => println!("Created task {} on {}", id, day),
            None => eprintln!("Not creating a task with an empty text"),
        }
        board.set_reference_date(day.date());
    } else {
        if let Err(err) = apply_view_args(&mut board, &args) {
            eprintln!("{}\n\n{}", err, USAGE);
            std::process::exit(2);
        }
    }

    if board.refresh_holidays().await == false {
        log::warn!("Holidays have been discarded");
    }

    println!("---- {} -----", board.title());
    calendar_board::utils::print_day_cells(&board.day_cells());

    for warning in board.take_warnings() {
        eprintln!("Warning: {}", warning);
    }
}

fn apply_view_args<P, H>(board: &mut Board<P, H>, args: &[String]) -> Result<(), String>
where
    P: calendar_board::traits::TaskPersistence,
    H: calendar_board::traits::HolidaySource,
{
    for arg in args {
        if let Ok(mode) = arg.parse::<ViewMode>() {
            board.set_view_mode(mode);
            continue;
        }
        match NaiveDate::parse_from_str(arg, "%Y-%m-%d") {
            Ok(date) => board.set_reference_date(date),
            Err(_) => return Err(format!("Invalid argument {:?}", arg)),
        }
    }
    Ok(())
}
