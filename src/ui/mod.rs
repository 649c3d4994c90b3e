use colored::*;
use console::style;

pub fn init() {
    // Enable colored output on Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();
}

pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

pub fn step(message: &str) {
    println!("{} {}", style("›").cyan(), message);
}

pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message.green());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message.red());
}

pub fn warn(message: &str) {
    println!("{} {}", style("⚠").yellow(), message.yellow());
}

pub fn hint(message: &str) {
    println!("{} {}", style("💡").cyan(), message.dimmed());
}

pub fn section(title: &str) {
    println!("\n{}", title.bold().underline());
}

pub fn print_list(items: &[String]) {
    for item in items {
        println!("  {}", item.dimmed());
    }
}
