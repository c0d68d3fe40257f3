pub mod booking;
pub mod consultation;
pub mod service;
pub mod user;

pub use booking::{
    Booking, BookingDraft, BookingParams, BookingStatus, NewBooking, PaymentOption, ServiceType,
};
pub use consultation::{Consultation, ConsultationForm, NewConsultation};
pub use service::{catalog, find_service, Service};
pub use user::{NewUser, User};
