//! Text menu driving the registry.
//!
//! The shell reads commands and their arguments line by line, calls into the
//! [`Registry`] and prints the outcome. Every command is recorded in the
//! [`AuditLog`].

use crate::audit::AuditLog;
use crate::error::{BankError, Result};
use crate::money::Money;
use crate::registry::Registry;
use crate::transaction::Transaction;
use chrono::NaiveDate;
use log::debug;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Accepted birth date format.
pub const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

const MENU: &str = "
================ MENU ================
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[nc]\tNew account
[lc]\tList accounts
[ec]\tExport accounts (CSV)
[nu]\tNew client
[q]\tQuit
=> ";

/// Operator menu over any line-based input and output.
pub struct Shell<R, W> {
    registry: Registry,
    audit: AuditLog,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell over an empty registry.
    pub fn new(input: R, output: W, audit: AuditLog) -> Self {
        Shell {
            registry: Registry::new(),
            audit,
            input,
            output,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs the menu until the operator quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(option) = self.prompt(MENU)? else {
                break;
            };

            match option.as_str() {
                "d" => self.deposit()?,
                "s" => self.withdraw()?,
                "e" => self.statement()?,
                "nu" => self.create_client()?,
                "nc" => self.create_account()?,
                "lc" => self.list_accounts()?,
                "ec" => self.export_accounts()?,
                "q" => break,
                other => {
                    debug!("Unknown menu option '{}'", other);
                    writeln!(
                        self.output,
                        "\n@@@ Invalid operation, please select the desired operation again. @@@"
                    )?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Prints `message` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, outcome: &Result<()>, success: &str) -> Result<()> {
        match outcome {
            Ok(()) => writeln!(self.output, "\n=== {} ===", success)?,
            Err(e) => writeln!(self.output, "\n@@@ Operation failed! {} @@@", e)?,
        }
        Ok(())
    }

    fn deposit(&mut self) -> Result<()> {
        self.move_money(
            "deposit",
            Transaction::Deposit,
            "Enter the deposit amount: ",
            "Deposit completed successfully!",
        )
    }

    fn withdraw(&mut self) -> Result<()> {
        self.move_money(
            "withdraw",
            Transaction::Withdrawal,
            "Enter the withdrawal amount: ",
            "Withdrawal completed successfully!",
        )
    }

    fn move_money(
        &mut self,
        operation: &str,
        transaction: fn(Money) -> Transaction,
        amount_prompt: &str,
        success: &str,
    ) -> Result<()> {
        let Some(national_id) = self.prompt("Enter the client's national ID: ")? else {
            return Ok(());
        };

        let lookup = self.registry.primary_account(&national_id).map(|_| ());
        if let Err(e) = lookup {
            let outcome: Result<()> = Err(e);
            self.audit.record(operation, &national_id, &outcome);
            return self.report(&outcome, success);
        }

        let Some(amount_text) = self.prompt(amount_prompt)? else {
            return Ok(());
        };

        let args = format!("{}, {}", national_id, amount_text);
        let registry = &mut self.registry;
        let outcome = self.audit.wrap(operation, &args, || -> Result<()> {
            let amount = parse_amount(&amount_text)?;
            registry.apply(&national_id, transaction(amount))
        });

        self.report(&outcome, success)
    }

    fn statement(&mut self) -> Result<()> {
        let Some(national_id) = self.prompt("Enter the client's national ID: ")? else {
            return Ok(());
        };

        let statement = self.registry.statement(&national_id);
        let logged = statement.as_ref().map(|s| s.balance);
        self.audit.record("statement", &national_id, &logged);

        match statement {
            Ok(statement) => writeln!(self.output, "\n{}", statement)?,
            Err(e) => writeln!(self.output, "\n@@@ Operation failed! {} @@@", e)?,
        }
        Ok(())
    }

    fn create_client(&mut self) -> Result<()> {
        let Some(national_id) = self.prompt("Enter the national ID (numbers only): ")? else {
            return Ok(());
        };

        if self.registry.find_client(&national_id).is_some() {
            let outcome: Result<()> = Err(BankError::DuplicateClientId(national_id.clone()));
            self.audit.record("create_client", &national_id, &outcome);
            return self.report(&outcome, "Client created successfully!");
        }

        let Some(name) = self.prompt("Enter the full name: ")? else {
            return Ok(());
        };
        let Some(birth_text) = self.prompt("Enter the birth date (dd-mm-yyyy): ")? else {
            return Ok(());
        };
        let Some(address) =
            self.prompt("Enter the address (street, number - district - city/state): ")?
        else {
            return Ok(());
        };

        let args = format!("{}, {}, {}, {}", national_id, name, birth_text, address);
        let registry = &mut self.registry;
        let outcome = self.audit.wrap("create_client", &args, || -> Result<()> {
            let birth_date = parse_birth_date(&birth_text)?;
            registry
                .create_individual_client(&name, birth_date, &national_id, &address)
                .map(|_| ())
        });

        self.report(&outcome, "Client created successfully!")
    }

    fn create_account(&mut self) -> Result<()> {
        let Some(national_id) = self.prompt("Enter the client's national ID: ")? else {
            return Ok(());
        };

        let registry = &mut self.registry;
        let outcome = self.audit.wrap("create_account", &national_id, || {
            registry
                .create_checking_account(&national_id)
                .map(|account| account.number())
        });

        match outcome {
            Ok(number) => writeln!(
                self.output,
                "\n=== Account {} created successfully! ===",
                number
            )?,
            Err(e) => writeln!(
                self.output,
                "\n@@@ {}, account creation flow ended! @@@",
                e
            )?,
        }
        Ok(())
    }

    fn list_accounts(&mut self) -> Result<()> {
        let summaries = self
            .audit
            .wrap("list_accounts", "", || self.registry.list_accounts());

        for summary in summaries {
            writeln!(self.output, "{}", "=".repeat(100))?;
            writeln!(self.output, "{}", summary)?;
        }
        Ok(())
    }

    fn export_accounts(&mut self) -> Result<()> {
        let registry = &self.registry;
        let output = &mut self.output;
        let outcome = self
            .audit
            .wrap("export_accounts", "", || registry.write_accounts_csv(&mut *output));

        if let Err(e) = outcome {
            writeln!(self.output, "\n@@@ Operation failed! {} @@@", e)?;
        }
        Ok(())
    }
}

/// Parses an operator-entered amount. Unreadable input is an invalid amount.
pub fn parse_amount(text: &str) -> Result<Money> {
    Money::from_str(text).map_err(|_| BankError::InvalidAmount)
}

/// Parses a `dd-mm-yyyy` birth date.
pub fn parse_birth_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), BIRTH_DATE_FORMAT)
        .map_err(|_| BankError::InvalidBirthDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, Registry) {
        let mut output = Vec::new();
        let registry = {
            let mut shell = Shell::new(Cursor::new(script), &mut output, AuditLog::disabled());
            shell.run().unwrap();
            shell.registry
        };
        (String::from_utf8(output).unwrap(), registry)
    }

    const NEW_CLIENT: &str = "nu\n111\nMaria Lima\n04-07-1985\nAv. B, 20\n";

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap(), Money::from_str("12.5").unwrap());
        assert!(matches!(parse_amount("ten"), Err(BankError::InvalidAmount)));
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(
            parse_birth_date("04-07-1985").unwrap(),
            NaiveDate::from_ymd_opt(1985, 7, 4).unwrap()
        );
        assert!(matches!(
            parse_birth_date("1985-07-04"),
            Err(BankError::InvalidBirthDate(_))
        ));
    }

    #[test]
    fn test_quit_and_end_of_input() {
        let (output, _) = run_script("q\n");
        assert!(output.contains("[q]\tQuit"));

        let (output, _) = run_script("");
        assert!(output.contains("=> "));
    }

    #[test]
    fn test_unknown_option() {
        let (output, _) = run_script("zz\nq\n");
        assert!(output.contains("Invalid operation"));
    }

    #[test]
    fn test_full_session() {
        let script = format!("{}nc\n111\nd\n111\n100\ns\n111\n30\ne\n111\nlc\nq\n", NEW_CLIENT);
        let (output, registry) = run_script(&script);

        assert!(output.contains("Client created successfully!"));
        assert!(output.contains("Account 1 created successfully!"));
        assert!(output.contains("Deposit completed successfully!"));
        assert!(output.contains("Withdrawal completed successfully!"));
        assert!(output.contains("Withdrawal:\n\t$ 30.00"));
        assert!(output.contains("Balance:\n\t$ 70.00"));
        assert!(output.contains("Holder:\t\tMaria Lima"));
        assert_eq!(registry.primary_account("111").unwrap().balance(), Money::whole(70));
    }

    #[test]
    fn test_duplicate_client_stops_before_details() {
        let script = format!("{}nu\n111\nq\n", NEW_CLIENT);
        let (output, registry) = run_script(&script);

        assert!(output.contains("a client with national ID 111 already exists"));
        assert_eq!(registry.clients().len(), 1);
    }

    #[test]
    fn test_unknown_client_skips_amount_prompt() {
        let (output, _) = run_script("d\n999\nq\n");
        assert!(output.contains("client not found"));
        assert!(!output.contains("Enter the deposit amount"));
    }

    #[test]
    fn test_unreadable_amount() {
        let script = format!("{}nc\n111\nd\n111\nabc\nq\n", NEW_CLIENT);
        let (output, registry) = run_script(&script);

        assert!(output.contains("the amount given is invalid"));
        assert!(registry.primary_account("111").unwrap().history().is_empty());
    }

    #[test]
    fn test_overflowing_deposit_is_reported() {
        let script = format!(
            "{}nc\n111\nd\n111\n79228162514264337593543950335\nd\n111\n1\ne\n111\nq\n",
            NEW_CLIENT
        );
        let (output, registry) = run_script(&script);

        assert!(output.contains("@@@ Operation failed! the deposit would overflow the account balance @@@"));
        let account = registry.primary_account("111").unwrap();
        assert_eq!(account.balance(), Money::from(rust_decimal::Decimal::MAX));
        assert_eq!(account.history().len(), 1);
    }

    #[test]
    fn test_account_for_missing_client() {
        let (output, registry) = run_script("nc\n999\nq\n");
        assert!(output.contains("client not found, account creation flow ended!"));
        assert_eq!(registry.accounts().count(), 0);
    }

    #[test]
    fn test_export_accounts() {
        let script = format!("{}nc\n111\nec\nq\n", NEW_CLIENT);
        let (output, _) = run_script(&script);
        assert!(output.contains("branch,number,owner,balance"));
        assert!(output.contains("0001,1,Maria Lima,0.00"));
    }
}
