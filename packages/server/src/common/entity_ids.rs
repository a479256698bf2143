//! Typed ID definitions for every content entity.

pub use super::id::Id;

pub struct Tag;
pub struct Destination;
pub struct Package;
pub struct Offer;
pub struct Event;
pub struct Department;
pub struct DepartmentDestination;
pub struct WhatsAppTemplate;
pub struct Testimonial;
pub struct BlogPost;
pub struct FixedDeparture;
pub struct User;

pub type TagId = Id<Tag>;
pub type DestinationId = Id<Destination>;
pub type PackageId = Id<Package>;
pub type OfferId = Id<Offer>;
pub type EventId = Id<Event>;
pub type DepartmentId = Id<Department>;
/// Shared by wedding and quinceañera destination rows.
pub type DepartmentDestinationId = Id<DepartmentDestination>;
pub type TemplateId = Id<WhatsAppTemplate>;
pub type TestimonialId = Id<Testimonial>;
pub type BlogPostId = Id<BlogPost>;
pub type FixedDepartureId = Id<FixedDeparture>;
/// Staff account id issued by the auth provider.
pub type UserId = Id<User>;
