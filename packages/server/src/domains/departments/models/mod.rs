pub mod department;
pub mod department_destination;

pub use department::{CreateDepartment, Department, UpdateDepartment};
pub use department_destination::{
    CreateDepartmentDestination, DepartmentDestination, DepartmentDestinationFilter,
    DepartmentKind, UpdateDepartmentDestination,
};
