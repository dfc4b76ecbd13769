use schooldesk::validation::{
    Field, FormContext, ForgotPasswordInputs, RegisterInputs, ResetPasswordInputs,
    check_validation, field_message, is_valid_password, validate_form,
};

#[test]
fn confirm_password_follows_the_form() {
    let register = RegisterInputs {
        phone: "9876543210".to_string(),
        password: "Secret@123".to_string(),
        confirm_password: "Secret@123".to_string(),
    };
    assert!(validate_form(&register, FormContext::Register).is_ok());

    let reset = ResetPasswordInputs {
        old_password: "Temp2Pass@".to_string(),
        new_password: "Secret@123".to_string(),
        confirm_password: "Secret@124".to_string(),
    };
    assert!(check_validation(Field::ConfirmPassword, &reset, FormContext::ResetPassword));
    assert_eq!(
        field_message(Field::ConfirmPassword, &reset, FormContext::ResetPassword, true),
        Some("Password do not match".to_string())
    );

    let forgot = ForgotPasswordInputs {
        email: "office@school.tld".to_string(),
        new_password: "Secret@123".to_string(),
        confirm_password: "Secret@123".to_string(),
    };
    assert!(validate_form(&forgot, FormContext::ForgotPassword).is_ok());
}

#[test]
fn required_messages_only_after_submit() {
    let empty = RegisterInputs::default();
    assert_eq!(field_message(Field::Phone, &empty, FormContext::Register, false), None);
    assert_eq!(
        field_message(Field::Phone, &empty, FormContext::Register, true),
        Some("Phone number is required".to_string())
    );

    let err = validate_form(&empty, FormContext::Register).err();
    assert_eq!(err.map(|err| err.errors().len()), Some(3));
}

#[test]
fn password_rules() {
    assert!(is_valid_password("Secret@123"));
    assert!(!is_valid_password("secret@123"));
    assert!(!is_valid_password("Secret1234"));
    assert!(!is_valid_password("Sh@1"));
    assert!(!is_valid_password("Secret@123456789x"));
}
