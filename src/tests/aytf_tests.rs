use super::{get_phone_util, RegionCode};

#[test]
fn aytf_us() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());

    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    assert_eq!("650 2", formatter.input_digit('2'));
    assert_eq!("650 25", formatter.input_digit('5'));
    assert_eq!("650 253", formatter.input_digit('3'));
    // The seven-digit format matches the accrued digits exactly here.
    assert_eq!("650 2532", formatter.input_digit('2'));
    assert_eq!("650 253 22", formatter.input_digit('2'));
    assert_eq!("650 253 222", formatter.input_digit('2'));
    // Spec scenario S5.
    assert_eq!("650 253 2222", formatter.input_digit('2'));

    formatter.clear();
    assert_eq!("8", formatter.input_digit('8'));
    assert_eq!("80", formatter.input_digit('0'));
    assert_eq!("800", formatter.input_digit('0'));
    assert_eq!("800 2", formatter.input_digit('2'));
}

#[test]
fn aytf_us_with_national_prefix() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());

    assert_eq!("1", formatter.input_digit('1'));
    assert_eq!("16", formatter.input_digit('6'));
    assert_eq!("1 65", formatter.input_digit('5'));
    assert_eq!("1 650", formatter.input_digit('0'));
    assert_eq!("1 650 2", formatter.input_digit('2'));
    assert_eq!("1 650 25", formatter.input_digit('5'));
    assert_eq!("1 650 253", formatter.input_digit('3'));
    assert_eq!("1 650 2532", formatter.input_digit('2'));
    assert_eq!("1 650 253 22", formatter.input_digit('2'));
    assert_eq!("1 650 253 222", formatter.input_digit('2'));
    assert_eq!("1 650 253 2222", formatter.input_digit('2'));
}

#[test]
fn aytf_us_full_width_characters() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());

    // The raw input is echoed until formatting starts; from then on the
    // digits appear normalized.
    assert_eq!("\u{FF16}", formatter.input_digit('\u{FF16}'));
    assert_eq!("\u{FF16}\u{FF15}", formatter.input_digit('\u{FF15}'));
    assert_eq!("650", formatter.input_digit('\u{FF10}'));
    assert_eq!("650 2", formatter.input_digit('\u{FF12}'));
}

#[test]
fn aytf_unexpected_character_stops_formatting() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());

    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    // From the first unexpected character on, the raw input is echoed.
    assert_eq!("650/", formatter.input_digit('/'));
    assert_eq!("650/2", formatter.input_digit('2'));

    // A plus sign that is not leading also stops formatting.
    formatter.clear();
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("6+", formatter.input_digit('+'));
    assert_eq!("6+5", formatter.input_digit('5'));
}

#[test]
fn aytf_clear_resets_the_session() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    formatter.input_digit('6');
    formatter.input_digit('5');
    formatter.input_digit('0');
    formatter.clear();
    assert_eq!("2", formatter.input_digit('2'));
    assert_eq!("21", formatter.input_digit('1'));
}

#[test]
fn aytf_gb_with_national_prefix() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::gb());

    assert_eq!("0", formatter.input_digit('0'));
    assert_eq!("02", formatter.input_digit('2'));
    assert_eq!("020", formatter.input_digit('0'));
    assert_eq!("020 8", formatter.input_digit('8'));
    assert_eq!("020 87", formatter.input_digit('7'));
    assert_eq!("020 876", formatter.input_digit('6'));
    assert_eq!("020 8765", formatter.input_digit('5'));
    assert_eq!("020 8765 4", formatter.input_digit('4'));
    assert_eq!("020 8765 43", formatter.input_digit('3'));
    assert_eq!("020 8765 432", formatter.input_digit('2'));
    assert_eq!("020 8765 4321", formatter.input_digit('1'));
}

#[test]
fn aytf_ar_mobile_international() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::ar());

    assert_eq!("+", formatter.input_digit('+'));
    assert_eq!("+5", formatter.input_digit('5'));
    assert_eq!("+54 ", formatter.input_digit('4'));
    assert_eq!("+54 9", formatter.input_digit('9'));
    assert_eq!("+54 91", formatter.input_digit('1'));
    assert_eq!("+54 9 11", formatter.input_digit('1'));
    assert_eq!("+54 9 11 2", formatter.input_digit('2'));
    assert_eq!("+54 9 11 23", formatter.input_digit('3'));
    assert_eq!("+54 9 11 231", formatter.input_digit('1'));
    assert_eq!("+54 9 11 2312", formatter.input_digit('2'));
    assert_eq!("+54 9 11 2312 1", formatter.input_digit('1'));
    assert_eq!("+54 9 11 2312 12", formatter.input_digit('2'));
    assert_eq!("+54 9 11 2312 123", formatter.input_digit('3'));
    // Spec scenario S6.
    assert_eq!("+54 9 11 2312 1234", formatter.input_digit('4'));
}

#[test]
fn aytf_kr_international() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::kr());

    assert_eq!("+", formatter.input_digit('+'));
    assert_eq!("+8", formatter.input_digit('8'));
    assert_eq!("+82 ", formatter.input_digit('2'));
    assert_eq!("+82 2", formatter.input_digit('2'));
    assert_eq!("+82 25", formatter.input_digit('5'));
    assert_eq!("+82 2-53", formatter.input_digit('3'));
    assert_eq!("+82 2-531", formatter.input_digit('1'));
    assert_eq!("+82 2-5315", formatter.input_digit('5'));
    assert_eq!("+82 2-5315-6", formatter.input_digit('6'));
    assert_eq!("+82 2-5315-68", formatter.input_digit('8'));
    // On the last digit the 1-3-4 reading wins over the template.
    assert_eq!("+82 2-531-5684", formatter.input_digit('4'));
}

#[test]
fn aytf_nz_international_idd() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::nz());

    // A US number dialled from NZ with the IDD written out. As soon as
    // the country code appears, the US rules take over.
    assert_eq!("0", formatter.input_digit('0'));
    assert_eq!("00", formatter.input_digit('0'));
    assert_eq!("00 1 ", formatter.input_digit('1'));
    assert_eq!("00 1 6", formatter.input_digit('6'));
    assert_eq!("00 1 65", formatter.input_digit('5'));
    assert_eq!("00 1 650", formatter.input_digit('0'));
    assert_eq!("00 1 650 2", formatter.input_digit('2'));
    assert_eq!("00 1 650 25", formatter.input_digit('5'));
    assert_eq!("00 1 650 253", formatter.input_digit('3'));
    assert_eq!("00 1 650 2532", formatter.input_digit('2'));
    assert_eq!("00 1 650 253 22", formatter.input_digit('2'));
    assert_eq!("00 1 650 253 222", formatter.input_digit('2'));
    assert_eq!("00 1 650 253 2222", formatter.input_digit('2'));
}

#[test]
fn aytf_remember_position() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());

    formatter.input_digit_and_remember_position('1');
    formatter.input_digit('6');
    formatter.input_digit('5');
    assert_eq!(1, formatter.get_remembered_position());
    formatter.input_digit('0');
    formatter.input_digit('2');
    formatter.input_digit('5');
    assert_eq!(1, formatter.get_remembered_position());
    formatter.input_digit('3');
    formatter.input_digit('2');
    formatter.input_digit('2');
    formatter.input_digit('2');
    formatter.input_digit('2');
    // The caret stays right after the "1" in "1 650 253 2222".
    assert_eq!(1, formatter.get_remembered_position());

    // When formatting is abandoned the original raw position is
    // reported.
    formatter.clear();
    formatter.input_digit('6');
    formatter.input_digit_and_remember_position('5');
    formatter.input_digit('0');
    formatter.input_digit('/');
    assert_eq!(2, formatter.get_remembered_position());
}

#[test]
fn aytf_convergence_with_parser() {
    let phone_util = get_phone_util();
    // Feeding a full number through the formatter and parsing the output
    // gives the same number as parsing the raw digits.
    for (digits, region) in [
        ("6502532222", RegionCode::us()),
        ("02087654321", RegionCode::gb()),
        ("+5491123121234", RegionCode::ar()),
    ] {
        let mut formatter = phone_util.get_as_you_type_formatter(region);
        let formatted = formatter.input_string(digits);
        let from_formatted = phone_util.parse(&formatted, region).unwrap();
        let from_raw = phone_util.parse(digits, region).unwrap();
        assert_eq!(from_raw, from_formatted, "AYTF diverged for {}", digits);
    }
}
