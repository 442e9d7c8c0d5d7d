use colored::*;

use crate::terminal::print;

const ART: &str = r#"
                        _
          ___  _   _  (_) _   _  _ __
         / _ \| | | | | || | | || '_ \
        | (_) | |_| | | || |_| || |_) |
         \___/ \__,_| |_| \__,_|| .__/
                                |_|
"#;

pub fn print() {
    print::print(&format!("{}", ART.bright_green().bold()));
}
