use std::sync::Arc;

use client::BookingApi;
use engine::{AddOn, AvailabilityResult, Catalog, SubmissionOutcome};

use crate::{
    config::{BookArgs, Command, StayArgs},
    controller::{BookingForm, FormSettings},
    error::Result,
    notifier::{Notifier, ToastLevel},
};

/// Runs one CLI command. `Ok(false)` means the command ran but the booking
/// or check did not go through.
pub async fn run<A, N>(
    api: Arc<A>,
    notifier: N,
    command: &Command,
    settings: FormSettings,
    add_ons: Vec<AddOn>,
) -> Result<bool>
where
    A: BookingApi + 'static,
    N: Notifier,
{
    match command {
        Command::Catalog => {
            let catalog = Catalog::new(api.list_glamps().await?, add_ons);
            print_catalog(&catalog, settings.default_max_guests);
            Ok(true)
        }
        Command::Check(stay) => {
            let catalog = Catalog::new(api.list_glamps().await?, add_ons);
            let mut form = BookingForm::new(api, catalog, notifier, settings);
            fill_stay(&mut form, stay)?;
            form.settle().await;
            Ok(report_availability(&form))
        }
        Command::Book(book) => {
            let catalog = Catalog::new(api.list_glamps().await?, add_ons);
            let mut form = BookingForm::new(api, catalog, notifier, settings);
            book_stay(&mut form, book).await
        }
    }
}

fn print_catalog(catalog: &Catalog, default_max_guests: u32) {
    for glamp in catalog.glamps() {
        let capacity = glamp.capacity.unwrap_or(default_max_guests);
        println!(
            "{:<16} {:<28} {:>10}/night  up to {capacity} guests",
            glamp.id, glamp.name, glamp.price_per_night
        );
    }
    if !catalog.add_ons().is_empty() {
        println!();
        for add_on in catalog.add_ons() {
            println!("{:<16} {:<28} {:>10}", add_on.id, add_on.name, add_on.price);
        }
    }
}

fn fill_stay<A, N>(form: &mut BookingForm<A, N>, stay: &StayArgs) -> Result<()>
where
    A: BookingApi + 'static,
    N: Notifier,
{
    form.select_glamp(Some(&stay.glamp))?;
    form.set_check_in(Some(stay.check_in))?;
    form.set_check_out(Some(stay.check_out))?;
    if let Some(err) = form.date_error() {
        return Err(engine::EngineError::from(err).into());
    }
    Ok(())
}

fn report_availability<A, N>(form: &BookingForm<A, N>) -> bool
where
    A: BookingApi + 'static,
    N: Notifier,
{
    let available = matches!(form.availability(), AvailabilityResult::Available);
    if available {
        let price = form.price();
        println!("available: {} nights, {}", price.nights, price.total);
    }
    available
}

async fn book_stay<A, N>(form: &mut BookingForm<A, N>, book: &BookArgs) -> Result<bool>
where
    A: BookingApi + 'static,
    N: Notifier,
{
    fill_stay(form, &book.stay)?;
    form.set_guests(book.guests)?;
    form.set_customer_name(&book.name)?;
    form.set_customer_email(&book.email)?;
    form.set_customer_phone(&book.phone)?;
    if let Some(requests) = &book.requests {
        form.set_special_requests(requests)?;
    }
    for add_on in &book.add_ons {
        form.toggle_add_on(add_on)?;
    }

    form.settle().await;
    let price = form.price();
    let outcome = form.submit().await?;
    if outcome.is_success() {
        println!("total charged: {} ({} nights)", price.total, price.nights);
    } else if let SubmissionOutcome::ValidationError(errors) = &outcome {
        for (field, message) in errors.iter() {
            eprintln!("  {field}: {message}");
        }
    }
    Ok(outcome.is_success())
}

/// Reports a failure that stopped a command before any outcome existed.
pub fn report_error<N: Notifier>(notifier: &N, err: &crate::error::AppError) {
    notifier.notify(ToastLevel::Error, &err.to_string());
}
