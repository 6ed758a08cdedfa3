//! Checkout command.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, Password};
use storefront_commerce::checkout::{
    CheckoutField, CheckoutForm, CheckoutSession, OrderConfirmation,
};
use storefront_commerce::CommerceError;

use super::cart::print_summary;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    if cart.state().is_empty() {
        bail!("Your cart is empty. Add something with `storefront cart add <product>` first.");
    }

    let interactive = !args.no_input && !ctx.output.is_json() && console::user_attended();
    let mut form = build_form(&args)?;

    ctx.output.header("Checkout");
    if !ctx.output.is_json() {
        print_summary(&cart.summary(), ctx);
    }
    if interactive {
        prompt_missing(&mut form)?;
    }

    let mut session =
        CheckoutSession::new(form).with_processing_delay(ctx.config.checkout.processing_delay());

    let spinner = ctx.output.spinner("Processing payment...");
    let result = session.submit(&mut cart).await;
    spinner.finish_and_clear();

    let confirmation = match result {
        Ok(confirmation) => confirmation,
        Err(CommerceError::InvalidForm(errors)) => {
            for error in errors.iter() {
                ctx.output
                    .error(&format!("{}: {}", error.field.label(), error.message));
            }
            bail!("Checkout form has {} problem(s)", errors.len());
        }
        Err(e) => return Err(e).context("Checkout failed"),
    };

    print_confirmation(&confirmation, ctx);
    Ok(())
}

/// Start from `--form`, then apply individual flags on top.
fn build_form(args: &CheckoutArgs) -> Result<CheckoutForm> {
    let mut form = match &args.form {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read form file: {}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse form file: {}", path))?
        }
        None => CheckoutForm::new(),
    };

    let flags = [
        (CheckoutField::Email, &args.email),
        (CheckoutField::FirstName, &args.first_name),
        (CheckoutField::LastName, &args.last_name),
        (CheckoutField::Address, &args.address),
        (CheckoutField::City, &args.city),
        (CheckoutField::State, &args.state),
        (CheckoutField::ZipCode, &args.zip_code),
        (CheckoutField::NameOnCard, &args.name_on_card),
        (CheckoutField::CardNumber, &args.card_number),
        (CheckoutField::ExpiryDate, &args.expiry_date),
        (CheckoutField::Cvv, &args.cvv),
    ];
    for (field, value) in flags {
        if let Some(value) = value {
            form.set(field, value.as_str());
        }
    }

    Ok(form)
}

fn prompt_missing(form: &mut CheckoutForm) -> Result<()> {
    for field in form.missing_fields() {
        let value: String = if field.is_secret() {
            Password::new().with_prompt(field.label()).interact()?
        } else {
            Input::new()
                .with_prompt(field.label())
                .allow_empty(true)
                .interact_text()?
        };
        form.set(field, value);
    }
    Ok(())
}

fn print_confirmation(confirmation: &OrderConfirmation, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(confirmation);
        return;
    }

    ctx.output.success("Order placed!");
    ctx.output.kv("Order", confirmation.order_id.as_str());
    ctx.output.kv(
        "Placed",
        &confirmation
            .placed_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    );
    ctx.output.kv("Items", &confirmation.item_count().to_string());
    ctx.output.kv("Total", &confirmation.summary.total.display());
    ctx.output.kv("Card", &confirmation.card);
    ctx.output.kv(
        "Ship to",
        &format!(
            "{}, {}",
            confirmation.ship_to.full_name(),
            confirmation.ship_to.one_line()
        ),
    );
    ctx.output.info(&format!(
        "A confirmation email will be sent to {}",
        confirmation.email
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CheckoutArgs {
        CheckoutArgs {
            form: None,
            email: None,
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            name_on_card: None,
            card_number: None,
            expiry_date: None,
            cvv: None,
            no_input: true,
        }
    }

    #[test]
    fn test_flags_fill_form() {
        let mut args = args();
        args.email = Some("kim@example.com".to_string());
        args.zip_code = Some("10001".to_string());

        let form = build_form(&args).unwrap();
        assert_eq!(form.email, "kim@example.com");
        assert_eq!(form.shipping.zip_code, "10001");
        assert_eq!(form.missing_fields().len(), 9);
    }

    #[test]
    fn test_flags_override_form_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"email": "old@example.com", "city": "Austin"}"#).unwrap();

        let mut args = args();
        args.form = Some(path.to_string_lossy().to_string());
        args.email = Some("new@example.com".to_string());

        let form = build_form(&args).unwrap();
        assert_eq!(form.email, "new@example.com");
        assert_eq!(form.shipping.city, "Austin");
    }

    #[test]
    fn test_bad_form_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let mut args = args();
        args.form = Some(path.to_string_lossy().to_string());
        assert!(build_form(&args).is_err());
    }
}
