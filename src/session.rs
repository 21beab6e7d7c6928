//! Interactive menu loop over any line reader and writer

use std::io::{self, BufRead, Write};

use log::debug;

use crate::bank::Bank;
use crate::input::{
    parse_rule_line, parse_statement_line, parse_transaction_line, RULE_FORMAT, STATEMENT_FORMAT,
    TRANSACTION_FORMAT,
};
use crate::statement::{render_account, render_rules};

/// Menu choice, matched case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    InputTransactions,
    DefineRules,
    PrintStatement,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "I" => Some(MenuChoice::InputTransactions),
            "D" => Some(MenuChoice::DefineRules),
            "P" => Some(MenuChoice::PrintStatement),
            "Q" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Console session driving a `Bank`
pub struct Session<'a, R, W> {
    bank: &'a mut Bank,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(bank: &'a mut Bank, input: R, output: W) -> Self {
        Self { bank, input, output }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        let mut first = true;
        loop {
            if first {
                writeln!(self.output, "Welcome to AwesomeGIC Bank! What would you like to do?")?;
            } else {
                writeln!(self.output)?;
                writeln!(self.output, "Is there anything else you'd like to do?")?;
            }
            first = false;

            writeln!(self.output, "[I]nput transactions")?;
            writeln!(self.output, "[D]efine interest rules")?;
            writeln!(self.output, "[P]rint statement")?;
            writeln!(self.output, "[Q]uit")?;

            let Some(line) = self.prompt()? else {
                return self.farewell();
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::InputTransactions) => self.input_transaction()?,
                Some(MenuChoice::DefineRules) => self.define_rule()?,
                Some(MenuChoice::PrintStatement) => self.print_statement()?,
                Some(MenuChoice::Quit) => return self.farewell(),
                None => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Invalid input. Please try again.")?;
                }
            }
        }
    }

    /// Print `> ` and read one trimmed line; `None` at end of input
    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show the format hint and read the detail line; `None` means back to the menu
    fn prompt_details(&mut self, what: &str, format: &str) -> io::Result<Option<String>> {
        writeln!(self.output)?;
        writeln!(self.output, "Please enter {what} in {format} format")?;
        writeln!(self.output, "(or enter blank to go back to the main menu):")?;
        Ok(self.prompt()?.filter(|line| !line.is_empty()))
    }

    fn report_error(&mut self, err: impl std::fmt::Display) -> io::Result<()> {
        debug!("Input rejected: {err}");
        writeln!(self.output)?;
        writeln!(self.output, "{err}")
    }

    fn input_transaction(&mut self) -> io::Result<()> {
        let Some(line) = self.prompt_details("transaction details", TRANSACTION_FORMAT)? else {
            return Ok(());
        };

        let recorded = parse_transaction_line(&line).and_then(|req| self.bank.record_transaction(req).map(render_account));
        match recorded {
            Ok(table) => {
                writeln!(self.output)?;
                writeln!(self.output, "Transaction added successfully.")?;
                writeln!(self.output)?;
                writeln!(self.output, "{table}")
            }
            Err(err) => self.report_error(err),
        }
    }

    fn define_rule(&mut self) -> io::Result<()> {
        let Some(line) = self.prompt_details("interest rule details", RULE_FORMAT)? else {
            return Ok(());
        };

        match parse_rule_line(&line) {
            Ok(rule) => {
                self.bank.define_rule(rule);
                writeln!(self.output)?;
                writeln!(self.output, "Interest rule added successfully.")?;
                writeln!(self.output)?;
                writeln!(self.output, "{}", render_rules(self.bank.rules()))
            }
            Err(err) => self.report_error(err),
        }
    }

    fn print_statement(&mut self) -> io::Result<()> {
        let Some(line) = self.prompt_details("account and month to generate the statement", STATEMENT_FORMAT)? else {
            return Ok(());
        };

        let statement = parse_statement_line(&line).and_then(|req| self.bank.statement(&req.account, req.period));
        match statement {
            Ok(statement) => {
                writeln!(self.output)?;
                writeln!(self.output, "{statement}")
            }
            Err(err) => self.report_error(err),
        }
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Thank you for banking with AwesomeGIC Bank.")?;
        writeln!(self.output, "Have a nice day!")
    }
}
