pub mod department;
pub mod designation;
pub mod employee;
pub mod level;

pub use department::DepartmentRepository;
pub use designation::DesignationRepository;
pub use employee::EmployeeRepository;
pub use level::LevelRepository;
