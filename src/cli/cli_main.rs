use super::cli_networks::{count_menu, simplify_file_menu, simplify_store_menu};
use crate::settings::{AnalysisConfig, DEFAULT_CONFIG_FILE};
use log::error;
use std::io::{self, Write};

pub fn run_interactive_menu(config: &AnalysisConfig) {
    loop {
        show_main_menu();
        let choice = match get_user_input() {
            Ok(choice) => choice,
            Err(e) => {
                error!("failed to read input: {}", e);
                break;
            }
        };

        let result = match choice.trim() {
            "1" => count_menu(config),
            "2" => simplify_file_menu(config),
            "3" => simplify_store_menu(config),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("\x1b[31m{}\x1b[0m", e);
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Red (\x1b[31m) - errors

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to OsciNet: reaction statistics and simplification\n
    of oscillating chemical reaction networks \n
    (configuration: {}) \n \x1b[0m",
        DEFAULT_CONFIG_FILE
    );
    println!("\x1b[33m1. Count reaction shapes and motifs of stored models\x1b[0m");
    println!("\x1b[33m2. Simplify a model file\x1b[0m");
    println!("\x1b[33m3. Simplify all stored models\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

pub(crate) fn get_user_input() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}

pub(crate) fn prompt(text: &str) -> io::Result<String> {
    print!("\x1b[36m{}\x1b[0m", text);
    io::stdout().flush()?;
    Ok(get_user_input()?.trim().to_string())
}
