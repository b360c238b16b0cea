// ============================================================================
// Basic Usage Example
// ============================================================================

use precise_quantity::prelude::*;

fn main() -> NumericResult<()> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Precise Quantity Example ===\n");

    let math = DecimalMath::from_config(&MathConfig::exact())?;
    println!("Using the {} backend\n", math.backend_name());

    // Canonical decimals
    println!("=== Decimals ===");
    for input in ["1.50", "-0.0", "+42", "007", "1e3"] {
        match Decimal::parse(input) {
            Ok(value) => println!("  {input:>6} -> {value}"),
            Err(err) => println!("  {input:>6} -> rejected ({err})"),
        }
    }

    let a = Decimal::parse("+0.5")?;
    let b = Decimal::parse("+2")?;
    println!("\n  {a} + {a} = {}", math.sum(&a, &a)?);
    println!("  {a} * {b} = {}", math.product(&a, &b)?);
    println!("  bump(+9.99)  = {}", math.bump(&Decimal::parse("+9.99")?)?);
    println!("  slump(+0.00) = {}", math.slump(&Decimal::parse("+0.00")?)?);
    println!("  round(+1.45, 3 digits) = {}", math.round_to_digit(&Decimal::parse("+1.45")?, 3)?);
    println!("  shift(+1.234, -2) = {}", math.shift(&Decimal::parse("+1.234")?, -2)?);

    // Float fallback for comparison
    let float = DecimalMath::from_config(&MathConfig::float_fallback())?;
    let tenth = Decimal::parse("+0.1")?;
    let fifth = Decimal::parse("+0.2")?;
    println!("\n  exact: 0.1 + 0.2 = {}", math.sum(&tenth, &fifth)?);
    println!("  float: 0.1 + 0.2 = {}", float.sum(&tenth, &fifth)?);

    // Quantities with uncertainty
    println!("\n=== Quantities ===");
    let length = Quantity::from_number_strs("10", "m", Some("11"), Some("9"))?;
    print_quantity("length", &length, &math)?;

    let cube = |x: &Decimal| math.product(&math.product(x, x)?, x);
    let volume = length.transform("m^3", &cube, &math)?;
    print_quantity("volume", &volume, &math)?;

    let to_inches = ScaleBy::new(Decimal::parse("+39.3701")?, &math);
    let inches = length.transform("in", &to_inches, &math)?;
    print_quantity("length", &inches, &math)?;

    let millimetres = length.transform("mm", &ShiftBy::new(3, &math), &math)?;
    print_quantity("length", &millimetres, &math)?;

    // Bound violations are rejected, never clamped
    match Quantity::from_number_strs("10", "m", Some("9"), None) {
        Ok(_) => println!("\nunexpected success"),
        Err(err) => println!("\nRejected: {err} ({:?})", err.kind()),
    }

    Ok(())
}

fn print_quantity(label: &str, quantity: &Quantity, math: &DecimalMath) -> NumericResult<()> {
    match (quantity.bounds(), quantity.uncertainty_margin(math)?) {
        (Some(bounds), Some(margin)) => println!(
            "  {label}: {} {} (± {margin}, [{}, {}], order {:?})",
            quantity.amount(),
            quantity.unit(),
            bounds.lower(),
            bounds.upper(),
            quantity.order_of_uncertainty(),
        ),
        _ => println!("  {label}: {} {}", quantity.amount(), quantity.unit()),
    }
    Ok(())
}
